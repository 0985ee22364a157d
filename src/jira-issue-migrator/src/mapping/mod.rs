//! Projection of raw Jira tickets onto GitHub issues.

mod assignee;
mod normalized;

pub use assignee::AssigneeDirectory;
pub use normalized::NormalizedIssue;

use crate::config::MigrationSettings;
use crate::jira::{browse_url, RawTicket};
use crate::markup::format_description;
use crate::templates::{generate_issue_title, generate_migration_footer};
use std::collections::BTreeSet;
use tracing::debug;
use url::Url;

/// Maps raw tickets to [`NormalizedIssue`]s.
#[derive(Debug, Clone)]
pub struct TicketMapper {
    jira_base_url: Url,
    import_label: String,
    bug_label: String,
    bug_issue_types: BTreeSet<String>,
    directory: AssigneeDirectory,
}

impl TicketMapper {
    /// Creates a mapper linking back to the Jira site at `jira_base_url`.
    #[must_use]
    pub fn new(jira_base_url: Url, settings: &MigrationSettings) -> Self {
        Self {
            jira_base_url,
            import_label: settings.import_label.clone(),
            bug_label: settings.bug_label.clone(),
            bug_issue_types: settings.bug_issue_types.iter().cloned().collect(),
            directory: AssigneeDirectory::from_settings(settings),
        }
    }

    /// Maps every non-subtask ticket, preserving order.
    #[must_use]
    pub fn map_tickets(&self, tickets: &[RawTicket]) -> Vec<NormalizedIssue> {
        tickets
            .iter()
            .filter(|ticket| {
                let keep = !ticket.is_subtask();
                if !keep {
                    debug!(key = %ticket.key, "Skipping subtask");
                }
                keep
            })
            .map(|ticket| self.map_ticket(ticket))
            .collect()
    }

    /// Maps a single ticket. Subtask filtering is the caller's concern.
    #[must_use]
    pub fn map_ticket(&self, ticket: &RawTicket) -> NormalizedIssue {
        let key = ticket.key.as_str();

        let mut labels = BTreeSet::from([self.import_label.clone()]);
        if self.bug_issue_types.contains(ticket.issue_type()) {
            labels.insert(self.bug_label.clone());
        }

        let mut description = format_description(ticket.description());
        description.push_str(&generate_migration_footer(
            key,
            &browse_url(&self.jira_base_url, key),
            ticket.reporter_name(),
        ));

        let assignee = self.directory.resolve(ticket.assignee_name());
        let assignable = self.directory.is_assignable(&assignee);

        NormalizedIssue {
            title: generate_issue_title(key, &ticket.fields.summary),
            description,
            labels,
            assignee,
            assignable,
            source_key: key.to_string(),
        }
    }
}
