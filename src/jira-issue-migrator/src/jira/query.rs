//! JQL construction.

use super::window::DateWindow;

/// Filter selecting the tickets to migrate.
#[derive(Debug, Clone)]
pub struct TicketQuery {
    /// Jira project key.
    pub project: String,

    /// Label every migrated ticket carries.
    pub label: String,
}

impl TicketQuery {
    /// Creates a query for unresolved tickets in `project` labelled `label`.
    pub fn new(project: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            label: label.into(),
        }
    }

    /// Builds the JQL for tickets created within `window`, most recently
    /// updated first.
    #[must_use]
    pub fn jql(&self, window: &DateWindow) -> String {
        format!(
            "project = {} AND labels = {} AND resolution = Unresolved AND created >= {} AND created <= {} ORDER BY updated DESC",
            quote(&self.project),
            quote(&self.label),
            window.start.format("%Y-%m-%d"),
            window.end.format("%Y-%m-%d"),
        )
    }
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}
