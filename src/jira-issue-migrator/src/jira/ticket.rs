//! Raw ticket records returned by the Jira search API.

use serde::Deserialize;

/// Issue type name Jira uses for subtasks.
pub const SUBTASK_ISSUE_TYPE: &str = "Sub-task";

/// A ticket as returned by the Jira REST API.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTicket {
    /// Numeric ticket id, kept as returned.
    pub id: String,

    /// Ticket key (e.g. "PROJ-123").
    pub key: String,

    /// Ticket fields.
    pub fields: TicketFields,
}

/// The subset of ticket fields used for migration.
#[derive(Debug, Clone, Deserialize)]
pub struct TicketFields {
    /// One-line summary.
    #[serde(default)]
    pub summary: String,

    /// Description in Jira wiki markup.
    #[serde(default)]
    pub description: Option<String>,

    /// Issue type.
    #[serde(rename = "issuetype")]
    pub issue_type: IssueType,

    /// Reporter, absent for anonymous or deleted users.
    #[serde(default)]
    pub reporter: Option<JiraUser>,

    /// Assignee, absent when unassigned.
    #[serde(default)]
    pub assignee: Option<JiraUser>,
}

/// Jira issue type.
#[derive(Debug, Clone, Deserialize)]
pub struct IssueType {
    /// Display name (e.g. "Bug").
    pub name: String,

    /// Whether Jira flags the type as a subtask.
    #[serde(default)]
    pub subtask: bool,
}

/// A Jira user reference.
#[derive(Debug, Clone, Deserialize)]
pub struct JiraUser {
    /// Display name shown in the Jira UI.
    #[serde(rename = "displayName")]
    pub display_name: String,
}

impl RawTicket {
    /// Returns the issue type name.
    #[must_use]
    pub fn issue_type(&self) -> &str {
        &self.fields.issue_type.name
    }

    /// Returns true for subtasks, which are never migrated.
    #[must_use]
    pub fn is_subtask(&self) -> bool {
        self.fields.issue_type.subtask || self.issue_type() == SUBTASK_ISSUE_TYPE
    }

    /// Returns the description, or an empty string if there is none.
    #[must_use]
    pub fn description(&self) -> &str {
        self.fields.description.as_deref().unwrap_or_default()
    }

    /// Returns the reporter display name, or an empty string.
    #[must_use]
    pub fn reporter_name(&self) -> &str {
        self.fields
            .reporter
            .as_ref()
            .map_or("", |user| user.display_name.as_str())
    }

    /// Returns the assignee display name, if assigned.
    #[must_use]
    pub fn assignee_name(&self) -> Option<&str> {
        self.fields
            .assignee
            .as_ref()
            .map(|user| user.display_name.as_str())
    }
}

/// Body of a Jira search response.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub(crate) issues: Vec<RawTicket>,
}
