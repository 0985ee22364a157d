//! Normalized issue representation.

use std::collections::BTreeSet;

/// A Jira ticket projected onto the shape of a GitHub issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedIssue {
    /// Issue title, `"<key>: <summary>"`.
    pub title: String,

    /// Translated, length-capped description with the migration footer.
    pub description: String,

    /// Labels to apply.
    pub labels: BTreeSet<String>,

    /// Resolved GitHub handle, empty if the assignee couldn't be resolved.
    pub assignee: String,

    /// Whether `assignee` may be assigned on creation.
    pub assignable: bool,

    /// Originating Jira key.
    pub source_key: String,
}

impl NormalizedIssue {
    /// Returns the handles to assign on creation.
    #[must_use]
    pub fn assignees(&self) -> Vec<String> {
        if self.assignable {
            vec![self.assignee.clone()]
        } else {
            Vec::new()
        }
    }

    /// Returns true if an assignee resolved but can't be assigned.
    #[must_use]
    pub fn needs_manual_assignment(&self) -> bool {
        !self.assignable && !self.assignee.is_empty()
    }
}
