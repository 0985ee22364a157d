//! Comment template error types.

/// Errors raised while compiling or rendering comment templates.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// A template referenced missing data or failed to render.
    #[error("Failed to render comment template: {0}")]
    RenderError(#[from] handlebars::RenderError),

    /// A template failed to compile.
    #[error("Invalid comment template: {0}")]
    RegistrationError(#[from] handlebars::TemplateError),
}
