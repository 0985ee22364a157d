//! Jira client error types.

use thiserror::Error;

/// Errors that can occur while talking to Jira.
#[derive(Debug, Error)]
pub enum JiraError {
    /// Transport or decoding error.
    #[error("Jira request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Jira answered with a non-success status.
    #[error("Jira returned status {status}: {message}")]
    Status { status: u16, message: String },

    /// An endpoint URL could not be built.
    #[error("Invalid Jira URL: {0}")]
    Url(#[from] url::ParseError),
}
