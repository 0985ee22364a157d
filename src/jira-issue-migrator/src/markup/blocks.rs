//! `{code}` and `{noformat}` blocks.

use super::pass::PassMatch;

const CODE_OPEN: &str = "{code";
const CODE_CLOSE: &str = "{code}";
const NOFORMAT: &str = "{noformat}";

/// Column past which long block lines are broken at the next space.
///
/// Jira wraps preformatted blocks when displaying them, GitHub does not.
pub(crate) const WRAP_COLUMN: usize = 100;

/// Finds a `{code}` or `{code:params}` block.
pub(crate) fn find_code_block(text: &str) -> PassMatch<'_> {
    let Some(start) = text.find(CODE_OPEN) else {
        return PassMatch::NoMatch;
    };
    let Some(open_end) = text[start..].find('}').map(|i| start + i) else {
        return PassMatch::NoMatch;
    };
    let Some(close) = text[open_end..].find(CODE_CLOSE).map(|i| open_end + i) else {
        return PassMatch::NoMatch;
    };

    PassMatch::Matched {
        before: &text[..start],
        token: fence(&text[open_end + 1..close]),
        after: &text[close + CODE_CLOSE.len()..],
    }
}

/// Finds a `{noformat}` block.
pub(crate) fn find_noformat_block(text: &str) -> PassMatch<'_> {
    let Some(start) = text.find(NOFORMAT) else {
        return PassMatch::NoMatch;
    };
    let body_start = start + NOFORMAT.len();
    let Some(close) = text[body_start..].find(NOFORMAT).map(|i| body_start + i) else {
        return PassMatch::NoMatch;
    };

    PassMatch::Matched {
        before: &text[..start],
        token: fence(&text[body_start..close]),
        after: &text[close + NOFORMAT.len()..],
    }
}

fn fence(body: &str) -> String {
    format!("```\n{}\n```\n", wrap_long_lines(body))
}

/// Breaks lines longer than [`WRAP_COLUMN`] at the first space at or past it.
pub(crate) fn wrap_long_lines(body: &str) -> String {
    let mut wrapped = String::with_capacity(body.len());
    let mut column = 0;

    for ch in body.chars() {
        match ch {
            '\n' => {
                wrapped.push('\n');
                column = 0;
            }
            ' ' if column >= WRAP_COLUMN => {
                wrapped.push('\n');
                column = 0;
            }
            _ => {
                wrapped.push(ch);
                column += 1;
            }
        }
    }

    wrapped
}
