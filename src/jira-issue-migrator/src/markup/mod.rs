//! Jira wiki markup to GitHub-flavored Markdown translation.
//!
//! The translator is a chain of single-construct passes applied in a fixed
//! precedence order. Each pass looks for its own delimiters; text in front of
//! a match is handed to the next (lower precedence) pass, and text after the
//! match is scanned again by the same pass. Text that reaches the end of the
//! chain has the Markdown-sensitive sequences escaped.
//!
//! Translation never fails: unmatched delimiters are passed through as
//! literal text.

mod blocks;
mod escape;
mod inline;
mod lines;
mod links;
mod pass;

use pass::PRECEDENCE;

/// Maximum number of characters kept from a translated description.
pub const MAX_DESCRIPTION_CHARS: usize = 65_000;

/// Suffix appended to descriptions cut at [`MAX_DESCRIPTION_CHARS`].
pub const TRUNCATION_NOTICE: &str =
    "\n\n issue truncated because of its length - to see full context, see original Jira";

/// Translates Jira wiki markup into GitHub-flavored Markdown.
///
/// The output is meant to render the same way, not to be a faithful
/// Markdown AST. The same input always yields the same output.
#[must_use]
pub fn translate(source: &str) -> String {
    let mut out = String::with_capacity(source.len() + source.len() / 8);
    pass::apply(&PRECEDENCE, source, &mut out);
    out
}

/// Cuts `text` to [`MAX_DESCRIPTION_CHARS`] characters, appending
/// [`TRUNCATION_NOTICE`] when anything was removed.
#[must_use]
pub fn truncate(text: &str) -> String {
    match text.char_indices().nth(MAX_DESCRIPTION_CHARS) {
        Some((cut, _)) => {
            let mut truncated = String::with_capacity(cut + TRUNCATION_NOTICE.len());
            truncated.push_str(&text[..cut]);
            truncated.push_str(TRUNCATION_NOTICE);
            truncated
        }
        None => text.to_string(),
    }
}

/// Translates a ticket description and applies the length cap.
#[must_use]
pub fn format_description(source: &str) -> String {
    truncate(&translate(source))
}
