//! Constructs delimited on a single line: `{{code}}`, `+underline+`,
//! `{_}italics{_}` and `{*}bold{*}`.

use super::pass::PassMatch;

pub(crate) fn find_inline_code(text: &str) -> PassMatch<'_> {
    find_delimited(text, "{{", "}}", "`", "`")
}

// Markdown has no underline.
pub(crate) fn find_underline(text: &str) -> PassMatch<'_> {
    find_delimited(text, "+", "+", "**", "**")
}

pub(crate) fn find_italics(text: &str) -> PassMatch<'_> {
    find_delimited(text, "{_}", "{_}", "_", "_")
}

// Rendered as underscore emphasis, same as italics.
pub(crate) fn find_bold(text: &str) -> PassMatch<'_> {
    find_delimited(text, "{*}", "{*}", "_", "_")
}

/// Finds the first `open`..`close` pair whose closing delimiter sits on the
/// same line as the opening one and encloses some text.
///
/// Openers that fail the check are left as literal text and scanning resumes
/// right after them.
fn find_delimited<'a>(
    text: &'a str,
    open: &str,
    close: &str,
    prefix: &str,
    suffix: &str,
) -> PassMatch<'a> {
    let mut from = 0;

    while let Some(offset) = text[from..].find(open) {
        let start = from + offset;
        let body_start = start + open.len();
        let Some(end) = text[body_start..].find(close).map(|i| body_start + i) else {
            return PassMatch::NoMatch;
        };

        let body = &text[body_start..end];
        if !body.is_empty() && !body.contains('\n') {
            return PassMatch::Matched {
                before: &text[..start],
                token: format!("{prefix}{body}{suffix}"),
                after: &text[end + close.len()..],
            };
        }

        from = body_start;
    }

    PassMatch::NoMatch
}
