//! Migration settings loaded from an optional TOML file.

use crate::config::ConfigError;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::debug;

/// Tunables and static lookup tables for a migration.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct MigrationSettings {
    /// Label added to every migrated issue.
    #[serde(default = "default_import_label")]
    pub import_label: String,

    /// Label added to issues created from bug tickets.
    #[serde(default = "default_bug_label")]
    pub bug_label: String,

    /// Jira issue types treated as bugs.
    #[serde(default = "default_bug_issue_types")]
    pub bug_issue_types: Vec<String>,

    /// Jira display name to GitHub handle.
    #[serde(default)]
    pub assignees: BTreeMap<String, String>,

    /// Handles that may be assigned on creation.
    #[serde(default)]
    pub assignable: BTreeSet<String>,

    /// Size of each created-date window, in days.
    #[serde(default = "default_window_days")]
    pub window_days: u32,

    /// Result cap for each Jira search.
    #[serde(default = "default_max_results")]
    pub max_results: u32,

    /// Attempts per GitHub write before giving up. Unset retries forever.
    #[serde(default)]
    pub max_attempts: Option<u32>,

    /// Base of the exponential backoff, in seconds.
    #[serde(default = "default_backoff_base_secs")]
    pub backoff_base_secs: u64,

    /// Comment templates.
    #[serde(default)]
    pub templates: CommentTemplates,
}

/// Handlebars templates for the comments the migrator posts.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct CommentTemplates {
    /// Comment left on the Jira ticket. Variables: `issue_url`,
    /// `issue_number`, `source_key`.
    #[serde(default = "default_cross_link_template")]
    pub cross_link: String,

    /// Comment left on a GitHub issue whose assignee could not be set.
    /// Variables: `assignee`, `source_key`.
    #[serde(default = "default_unassignable_template")]
    pub unassignable: String,
}

impl Default for CommentTemplates {
    fn default() -> Self {
        Self {
            cross_link: default_cross_link_template(),
            unassignable: default_unassignable_template(),
        }
    }
}

impl Default for MigrationSettings {
    fn default() -> Self {
        Self {
            import_label: default_import_label(),
            bug_label: default_bug_label(),
            bug_issue_types: default_bug_issue_types(),
            assignees: BTreeMap::new(),
            assignable: BTreeSet::new(),
            window_days: default_window_days(),
            max_results: default_max_results(),
            max_attempts: None,
            backoff_base_secs: default_backoff_base_secs(),
            templates: CommentTemplates::default(),
        }
    }
}

impl MigrationSettings {
    /// Loads and validates settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file can't be read, parsed or validated.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "Loading settings");

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        let settings: Self = toml::from_str(&content).map_err(|e| ConfigError::TomlError {
            path: path.display().to_string(),
            source: e,
        })?;

        settings.validate(path)?;
        Ok(settings)
    }

    /// Validates settings values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] describing the first problem.
    pub fn validate(&self, path: &Path) -> Result<(), ConfigError> {
        let fail = |message: String| ConfigError::ValidationError {
            path: path.display().to_string(),
            message,
        };

        if self.import_label.trim().is_empty() {
            return Err(fail("import-label cannot be empty".to_string()));
        }

        if self.bug_label.trim().is_empty() {
            return Err(fail("bug-label cannot be empty".to_string()));
        }

        if self.window_days == 0 {
            return Err(fail("window-days must be at least 1".to_string()));
        }

        if self.max_results == 0 {
            return Err(fail("max-results must be at least 1".to_string()));
        }

        if self.max_attempts == Some(0) {
            return Err(fail("max-attempts must be at least 1".to_string()));
        }

        if let Some((name, _)) = self
            .assignees
            .iter()
            .find(|(_, handle)| handle.trim().is_empty())
        {
            return Err(fail(format!("assignee '{name}' maps to an empty handle")));
        }

        Ok(())
    }
}

fn default_import_label() -> String {
    "jira".to_string()
}

fn default_bug_label() -> String {
    "bug".to_string()
}

fn default_bug_issue_types() -> Vec<String> {
    vec!["Bug".to_string(), "Unconfirmed Bug".to_string()]
}

fn default_window_days() -> u32 {
    90
}

fn default_max_results() -> u32 {
    1000
}

fn default_backoff_base_secs() -> u64 {
    60
}

pub(crate) fn default_cross_link_template() -> String {
    "This issue has been migrated to {{issue_url}}".to_string()
}

pub(crate) fn default_unassignable_template() -> String {
    "Unable to assign user (at){{assignee}}. Please assign yourself. \
     GitHub only allows assigning users who are active in this repository."
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_settings(content: &str) -> (TempDir, std::path::PathBuf) {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.toml");
        fs::write(&path, content).unwrap();
        (temp, path)
    }

    #[test]
    fn empty_file_uses_defaults() {
        let (_temp, path) = write_settings("");
        let settings = MigrationSettings::load(&path).unwrap();

        assert_eq!(settings.import_label, "jira");
        assert_eq!(settings.bug_issue_types, vec!["Bug", "Unconfirmed Bug"]);
        assert_eq!(settings.window_days, 90);
        assert_eq!(settings.max_results, 1000);
        assert_eq!(settings.max_attempts, None);
        assert!(settings.assignees.is_empty());
    }

    #[test]
    fn can_load_tables() {
        let (_temp, path) = write_settings(
            r#"
import-label = "imported"
assignable = ["ada"]
max-attempts = 5

[assignees]
"Ada Lovelace" = "ada"
"Charles Babbage" = "cbabbage"
"#,
        );

        let settings = MigrationSettings::load(&path).unwrap();

        assert_eq!(settings.import_label, "imported");
        assert_eq!(settings.assignees["Ada Lovelace"], "ada");
        assert!(settings.assignable.contains("ada"));
        assert_eq!(settings.max_attempts, Some(5));
    }

    #[test]
    fn rejects_zero_window() {
        let (_temp, path) = write_settings("window-days = 0");
        let result = MigrationSettings::load(&path);

        assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
    }

    #[test]
    fn rejects_unknown_keys() {
        let (_temp, path) = write_settings("windw-days = 3");
        let result = MigrationSettings::load(&path);

        assert!(matches!(result, Err(ConfigError::TomlError { .. })));
    }

    #[test]
    fn missing_file_is_io_error() {
        let temp = TempDir::new().unwrap();
        let result = MigrationSettings::load(&temp.path().join("nope.toml"));

        assert!(matches!(result, Err(ConfigError::IoError { .. })));
    }
}
