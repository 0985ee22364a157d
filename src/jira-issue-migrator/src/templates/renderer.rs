//! Template renderer.

use crate::config::CommentTemplates;
use handlebars::{no_escape, Handlebars};
use serde_json::{json, Value};

const CROSS_LINK: &str = "cross-link";
const UNASSIGNABLE: &str = "unassignable";

/// Creates a Handlebars registry for Markdown comments.
///
/// Output is not HTML-escaped, and referencing a variable the template data
/// lacks is a render error.
#[must_use]
pub fn create_handlebars_registry() -> Handlebars<'static> {
    let mut registry = Handlebars::new();
    registry.register_escape_fn(no_escape);
    registry.set_strict_mode(true);
    registry
}

/// Renders the comments posted during a migration.
pub struct TemplateRenderer {
    handlebars: Handlebars<'static>,
}

impl TemplateRenderer {
    /// Compiles the comment templates.
    ///
    /// # Errors
    ///
    /// Returns an error if a template fails to compile.
    pub fn new(templates: &CommentTemplates) -> Result<Self, super::TemplateError> {
        let mut handlebars = create_handlebars_registry();
        handlebars.register_template_string(CROSS_LINK, &templates.cross_link)?;
        handlebars.register_template_string(UNASSIGNABLE, &templates.unassignable)?;
        Ok(Self { handlebars })
    }

    /// Renders the comment left on a Jira ticket pointing at its new issue.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn render_cross_link(
        &self,
        issue_url: &str,
        issue_number: u64,
        source_key: &str,
    ) -> Result<String, super::TemplateError> {
        let data = json!({
            "issue_url": issue_url,
            "issue_number": issue_number,
            "source_key": source_key
        });

        self.render(CROSS_LINK, &data)
    }

    /// Renders the notice for an assignee GitHub would not accept.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn render_unassignable(
        &self,
        assignee: &str,
        source_key: &str,
    ) -> Result<String, super::TemplateError> {
        let data = json!({
            "assignee": assignee,
            "source_key": source_key
        });

        self.render(UNASSIGNABLE, &data)
    }

    fn render(&self, name: &str, data: &Value) -> Result<String, super::TemplateError> {
        Ok(self.handlebars.render(name, data)?)
    }
}
