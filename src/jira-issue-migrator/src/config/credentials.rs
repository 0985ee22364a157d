//! Credentials and identifiers read from the environment.

use super::ConfigError;
use std::fmt;
use std::str::FromStr;
use url::Url;

pub const JIRA_BASE_URL: &str = "JIRA_BASE_URL";
pub const JIRA_USERNAME: &str = "JIRA_USERNAME";
pub const JIRA_PASSWORD: &str = "JIRA_PASSWORD";
pub const JIRA_PROJECT: &str = "JIRA_PROJECT";
pub const JIRA_LABEL: &str = "JIRA_LABEL";
pub const GITHUB_TOKEN: &str = "GITHUB_TOKEN";
pub const GITHUB_REPO: &str = "GITHUB_REPO";

/// A GitHub repository in `owner/name` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryId {
    /// Repository owner (user or organization).
    pub owner: String,

    /// Repository name.
    pub name: String,
}

impl fmt::Display for RepositoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for RepositoryId {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidValue {
            name: GITHUB_REPO,
            message: format!("expected 'owner/name', got '{value}'"),
        };

        let (owner, name) = value.trim().split_once('/').ok_or_else(invalid)?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return Err(invalid());
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

/// Everything needed to reach both trackers.
#[derive(Clone)]
pub struct Credentials {
    /// Jira site URL, always ending with a slash.
    pub jira_base_url: Url,

    /// Jira user name for basic auth.
    pub jira_username: String,

    /// Jira password or API token for basic auth.
    pub jira_password: String,

    /// Jira project key to migrate.
    pub jira_project: String,

    /// Label selecting the tickets to migrate.
    pub jira_label: String,

    /// GitHub personal access token.
    pub github_token: String,

    /// Target repository.
    pub github_repo: RepositoryId,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("jira_base_url", &self.jira_base_url.as_str())
            .field("jira_username", &self.jira_username)
            .field("jira_project", &self.jira_project)
            .field("jira_label", &self.jira_label)
            .field("github_repo", &self.github_repo)
            .finish_non_exhaustive()
    }
}

impl Credentials {
    /// Reads credentials from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingVariable`] for the first unset or empty
    /// variable, or [`ConfigError::InvalidValue`] for a malformed one.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads credentials through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// # Errors
    ///
    /// Same as [`Credentials::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::MissingVariable { name })
        };

        let github_repo = require(GITHUB_REPO)?.parse::<RepositoryId>()?;
        let github_token = require(GITHUB_TOKEN)?;
        let jira_username = require(JIRA_USERNAME)?;
        let jira_password = require(JIRA_PASSWORD)?;
        let jira_project = require(JIRA_PROJECT)?;
        let jira_label = require(JIRA_LABEL)?;
        let jira_base_url = parse_base_url(&require(JIRA_BASE_URL)?)?;

        Ok(Self {
            jira_base_url,
            jira_username,
            jira_password,
            jira_project,
            jira_label,
            github_token,
            github_repo,
        })
    }
}

fn parse_base_url(value: &str) -> Result<Url, ConfigError> {
    let mut url = Url::parse(value.trim()).map_err(|e| ConfigError::InvalidValue {
        name: JIRA_BASE_URL,
        message: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidValue {
            name: JIRA_BASE_URL,
            message: format!("unsupported scheme '{}'", url.scheme()),
        });
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}
