//! Processing result types.

use crate::issues::CreatedIssue;

/// Result of processing a single ticket.
#[derive(Debug, Clone)]
pub enum ProcessingResult {
    /// The ticket became a GitHub issue.
    Migrated {
        /// Jira key.
        source_key: String,
        /// Created issue.
        issue: CreatedIssue,
        /// Whether the Jira ticket was commented with the issue link.
        cross_linked: bool,
    },

    /// The ticket was left alone.
    Skipped {
        /// Jira key.
        source_key: String,
        /// Reason for skipping.
        reason: String,
    },

    /// Creating the issue failed.
    Failed {
        /// Jira key.
        source_key: String,
        /// Error message.
        error: String,
    },
}
