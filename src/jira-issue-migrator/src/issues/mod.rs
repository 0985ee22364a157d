//! GitHub issue creation.
//!
//! The pipeline talks to the target tracker through [`IssueTracker`];
//! [`GitHubTracker`] is the production implementation.

mod error;
mod github;

pub use error::IssueError;
pub use github::GitHubTracker;

use crate::mapping::NormalizedIssue;
use async_trait::async_trait;
use serde::Serialize;

/// An issue that was created in the target tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatedIssue {
    /// Issue number.
    pub number: u64,

    /// Issue web URL.
    pub url: String,
}

/// Write side of the target tracker.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Creates an issue, assigning it only if it is assignable.
    async fn create_issue(&self, issue: &NormalizedIssue) -> Result<CreatedIssue, IssueError>;

    /// Comments on an existing issue.
    async fn create_comment(&self, issue_number: u64, body: &str) -> Result<(), IssueError>;
}
