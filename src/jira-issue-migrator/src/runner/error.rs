//! Runner error types.

/// Errors that stop a migration run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Configuration loading errors.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// GitHub API client initialization errors.
    #[error(transparent)]
    Octocrab(#[from] octocrab::Error),

    /// Fetching tickets from Jira failed.
    #[error(transparent)]
    Jira(#[from] crate::jira::JiraError),

    /// Migration state couldn't be persisted.
    #[error(transparent)]
    Ledger(#[from] crate::ledger::LedgerError),

    /// Comment templates failed to compile.
    #[error(transparent)]
    Template(#[from] crate::templates::TemplateError),
}
