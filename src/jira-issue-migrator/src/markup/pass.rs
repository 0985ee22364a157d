//! Pass dispatch.

use super::{blocks, escape, inline, lines, links};

/// Outcome of a single pass scanning a piece of text.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum PassMatch<'a> {
    /// The pass found none of its constructs.
    NoMatch,

    /// The pass found a construct.
    Matched {
        /// Text preceding the construct, handed to lower precedence passes.
        before: &'a str,
        /// Translated construct, emitted as-is.
        token: String,
        /// Text following the construct, scanned again by the same pass.
        after: &'a str,
    },
}

/// A single construct translator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Pass {
    CodeBlock,
    NoFormatBlock,
    Quote,
    InlineCode,
    Header,
    Link,
    Underline,
    Italics,
    Bold,
    ListItem,
}

/// Passes from highest to lowest precedence.
///
/// Quote blocks sit above the line and inline constructs because their body
/// is translated by the passes below them.
pub(crate) const PRECEDENCE: [Pass; 10] = [
    Pass::CodeBlock,
    Pass::NoFormatBlock,
    Pass::Quote,
    Pass::InlineCode,
    Pass::Header,
    Pass::Link,
    Pass::Underline,
    Pass::Italics,
    Pass::Bold,
    Pass::ListItem,
];

impl Pass {
    fn find<'a>(self, text: &'a str, lower: &[Pass]) -> PassMatch<'a> {
        match self {
            Self::CodeBlock => blocks::find_code_block(text),
            Self::NoFormatBlock => blocks::find_noformat_block(text),
            Self::Quote => escape::find_quote(text, lower),
            Self::InlineCode => inline::find_inline_code(text),
            Self::Header => lines::find_header(text),
            Self::Link => links::find_link(text),
            Self::Underline => inline::find_underline(text),
            Self::Italics => inline::find_italics(text),
            Self::Bold => inline::find_bold(text),
            Self::ListItem => lines::find_list_item(text),
        }
    }
}

/// Runs `text` through `passes`, appending the translation to `out`.
///
/// Recursion depth is bounded by the number of passes; repeated matches of
/// the same pass are consumed by the loop.
pub(crate) fn apply(passes: &[Pass], text: &str, out: &mut String) {
    let Some((pass, lower)) = passes.split_first() else {
        escape::escape_into(text, out);
        return;
    };

    let mut rest = text;
    loop {
        match pass.find(rest, lower) {
            PassMatch::NoMatch => {
                apply(lower, rest, out);
                return;
            }
            PassMatch::Matched {
                before,
                token,
                after,
            } => {
                apply(lower, before, out);
                out.push_str(&token);
                rest = after;
            }
        }
    }
}
