//! Quote blocks and escaping of Markdown-sensitive sequences.

use super::pass::{self, Pass, PassMatch};

const QUOTE: &str = "{quote}";

/// Finds a `{quote}` block and translates its body with `lower`. A block
/// missing its closing marker runs to the end of the text.
pub(crate) fn find_quote<'a>(text: &'a str, lower: &[Pass]) -> PassMatch<'a> {
    let Some(start) = text.find(QUOTE) else {
        return PassMatch::NoMatch;
    };
    let body_start = start + QUOTE.len();
    let (body, after) = match text[body_start..].find(QUOTE) {
        Some(offset) => (
            &text[body_start..body_start + offset],
            &text[body_start + offset + QUOTE.len()..],
        ),
        None => (&text[body_start..], ""),
    };

    let mut translated = String::with_capacity(body.len());
    pass::apply(lower, body, &mut translated);

    PassMatch::Matched {
        before: &text[..start],
        token: format!("> {}", translated.replace('\n', "\n> ")),
        after,
    }
}

/// Appends `text` to `out`, escaping `==`, `--` and `>`.
pub(crate) fn escape_into(text: &str, out: &mut String) {
    let escaped = text
        .replace("==", "\\==")
        .replace("--", "\\--")
        .replace('>', "\\>");
    out.push_str(&escaped);
}
