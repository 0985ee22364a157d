//! Issue creation error types.

use thiserror::Error;

/// Status GitHub answers with when a client is rate limited.
const RATE_LIMITED_STATUS: u16 = 403;

/// Errors that can occur during issue operations.
#[derive(Debug, Error)]
pub enum IssueError {
    /// Transport, client or decoding error from octocrab.
    #[error("GitHub API error: {0}")]
    GitHubError(#[source] octocrab::Error),

    /// GitHub answered with a non-success status.
    #[error("Unexpected GitHub status {status}: {message}")]
    UnexpectedStatus { status: u16, message: String },

    /// Retries ran out.
    #[error("Giving up after {attempts} attempts: {last_error}")]
    RetriesExhausted { attempts: u32, last_error: String },
}

impl From<octocrab::Error> for IssueError {
    fn from(error: octocrab::Error) -> Self {
        match error {
            octocrab::Error::GitHub { source, .. } => Self::UnexpectedStatus {
                status: source.status_code.as_u16(),
                message: source.message,
            },
            other => Self::GitHubError(other),
        }
    }
}

impl IssueError {
    /// Returns true for 403 responses, which GitHub uses for rate limiting.
    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        matches!(
            self,
            Self::UnexpectedStatus {
                status: RATE_LIMITED_STATUS,
                ..
            }
        )
    }
}
