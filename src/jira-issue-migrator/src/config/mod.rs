//! Configuration loading.
//!
//! Credentials come from environment variables and are all required.
//! Everything else lives in an optional TOML settings file:
//!
//! ```toml
//! import-label = "jira"
//! assignable = ["ada"]
//! max-attempts = 8
//!
//! [assignees]
//! "Ada Lovelace" = "ada"
//! ```

mod credentials;
mod error;
mod settings;

pub use credentials::{
    Credentials, RepositoryId, GITHUB_REPO, GITHUB_TOKEN, JIRA_BASE_URL, JIRA_LABEL,
    JIRA_PASSWORD, JIRA_PROJECT, JIRA_USERNAME,
};
pub use error::ConfigError;
pub use settings::{CommentTemplates, MigrationSettings};

use std::path::Path;
use tracing::info;

/// Loads settings from `path`, or returns the defaults when no path is given.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file can't be read, parsed or validated.
pub fn load_settings(path: Option<&Path>) -> Result<MigrationSettings, ConfigError> {
    match path {
        Some(path) => {
            info!(path = %path.display(), "Loading settings file");
            MigrationSettings::load(path)
        }
        None => Ok(MigrationSettings::default()),
    }
}
