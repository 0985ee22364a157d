//! Issue text and comment rendering.
//!
//! Titles and description footers have fixed formats. Comments are rendered
//! from Handlebars templates that can be overridden in the settings file.

mod error;
mod renderer;

pub use error::TemplateError;
pub use renderer::{create_handlebars_registry, TemplateRenderer};

/// Generates the GitHub issue title for a Jira ticket.
///
/// Format: "{key}: {summary}"
#[must_use]
pub fn generate_issue_title(key: &str, summary: &str) -> String {
    format!("{key}: {summary}")
}

/// Generates the footer appended to every migrated description.
#[must_use]
pub fn generate_migration_footer(key: &str, browse_url: &str, reporter: &str) -> String {
    format!(
        "\n\nImported from Jira [{key}]({browse_url}). Original Jira may contain additional context.\nReported by: {reporter}."
    )
}
