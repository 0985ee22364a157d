//! Line-leading constructs: `h1.`..`h5.` headers and `# ` list items.

use super::pass::PassMatch;

const HEADERS: [(&str, &str); 5] = [
    ("h1.", "#"),
    ("h2.", "##"),
    ("h3.", "###"),
    ("h4.", "####"),
    ("h5.", "#####"),
];

/// Finds the first header marker at the start of a line.
pub(crate) fn find_header(text: &str) -> PassMatch<'_> {
    let line_starts = std::iter::once(0).chain(text.match_indices('\n').map(|(i, _)| i + 1));

    for line_start in line_starts {
        let line = &text[line_start..];
        if let Some((marker, hashes)) = HEADERS.iter().find(|(marker, _)| line.starts_with(marker)) {
            return PassMatch::Matched {
                before: &text[..line_start],
                token: (*hashes).to_string(),
                after: &text[line_start + marker.len()..],
            };
        }
    }

    PassMatch::NoMatch
}

/// Finds the first `# ` list marker, ignoring spaces and blank lines in
/// front of it.
pub(crate) fn find_list_item(text: &str) -> PassMatch<'_> {
    let bytes = text.as_bytes();
    let mut cursor = 0;

    loop {
        while cursor < bytes.len() && matches!(bytes[cursor], b' ' | b'\n') {
            cursor += 1;
        }

        if bytes[cursor..].starts_with(b"# ") {
            return PassMatch::Matched {
                before: &text[..cursor],
                token: "- ".to_string(),
                after: &text[cursor + 2..],
            };
        }

        match text[cursor..].find('\n') {
            Some(offset) => cursor += offset,
            None => return PassMatch::NoMatch,
        }
    }
}
