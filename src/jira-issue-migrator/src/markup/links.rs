//! `[caption|url]` and `[url]` links.

use super::pass::PassMatch;

const SCHEME_MARKER: &str = "://";

/// Finds the first bracketed span and decides whether it is a link.
///
/// A span whose closing bracket is on a later line, or whose target has no
/// scheme, is passed through literally.
pub(crate) fn find_link(text: &str) -> PassMatch<'_> {
    let Some(start) = text.find('[') else {
        return PassMatch::NoMatch;
    };
    let Some(end) = text[start..].find(']').map(|i| start + i) else {
        return PassMatch::NoMatch;
    };

    if let Some(line_end) = text[start..].find('\n').map(|i| start + i) {
        if end > line_end {
            return PassMatch::Matched {
                before: &text[..=line_end],
                token: String::new(),
                after: &text[line_end + 1..],
            };
        }
    }

    let inner = &text[start + 1..end];
    let (caption, target) = inner.split_once('|').unwrap_or((inner, inner));

    if target.contains(SCHEME_MARKER) {
        PassMatch::Matched {
            before: &text[..start],
            token: format!("[{caption}]({target})"),
            after: &text[end + 1..],
        }
    } else {
        PassMatch::Matched {
            before: &text[..=end],
            token: String::new(),
            after: &text[end + 1..],
        }
    }
}
