//! Inline emphasis tokenizer.
//!
//! Splits a run of text into styled spans by scanning once, left to right,
//! over an ordered alternation of marker patterns. The first alternative
//! matching at a position wins:
//!
//! | Markers                 | Kind            |
//! |-------------------------|-----------------|
//! | `***x***`, `___x___`    | BoldItalic      |
//! | `**x**`, `__x__`        | Bold            |
//! | `*x*`, `_x_`            | Italic          |
//! | `` `x` ``               | Code            |
//! | `~~x~~`                 | Strikethrough   |
//!
//! Markers do not nest. The interior of a matched span is taken verbatim,
//! and unterminated markers stay in the surrounding plain text.

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

const INLINE_PATTERN: &str = concat!(
    r"\*\*\*(.+?)\*\*\*|___(.+?)___",
    r"|\*\*(.+?)\*\*|__(.+?)__",
    r"|\*([^*]+?)\*|_([^_]+?)_",
    r"|`([^`]+?)`",
    r"|~~(.+?)~~",
);

/// Capture group index to span kind, in alternation order.
const GROUP_KINDS: [(usize, FormatKind); 8] = [
    (1, FormatKind::BoldItalic),
    (2, FormatKind::BoldItalic),
    (3, FormatKind::Bold),
    (4, FormatKind::Bold),
    (5, FormatKind::Italic),
    (6, FormatKind::Italic),
    (7, FormatKind::Code),
    (8, FormatKind::Strikethrough),
];

fn inline_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(INLINE_PATTERN).ok()).as_ref()
}

/// Styling of an inline span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatKind {
    Plain,
    Bold,
    Italic,
    BoldItalic,
    Code,
    Strikethrough,
}

impl FormatKind {
    /// Whether the span renders bold.
    pub fn is_bold(self) -> bool {
        matches!(self, FormatKind::Bold | FormatKind::BoldItalic)
    }

    /// Whether the span renders italic.
    pub fn is_italic(self) -> bool {
        matches!(self, FormatKind::Italic | FormatKind::BoldItalic)
    }
}

/// A piece of text with one styling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineSpan {
    pub text: String,
    pub kind: FormatKind,
}

impl InlineSpan {
    pub fn new(text: impl Into<String>, kind: FormatKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, FormatKind::Plain)
    }
}

/// Tokenize `text` into styled spans.
///
/// Empty input yields no spans. Text with no markers yields one plain span.
pub fn tokenize(text: &str) -> Vec<InlineSpan> {
    if text.is_empty() {
        return Vec::new();
    }
    let Some(re) = inline_regex() else {
        return vec![InlineSpan::plain(text)];
    };

    let mut spans = Vec::new();
    let mut last = 0;
    for caps in re.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        if whole.start() > last {
            spans.push(InlineSpan::plain(&text[last..whole.start()]));
        }
        if let Some(span) = span_from_captures(&caps) {
            spans.push(span);
        }
        last = whole.end();
    }
    if last < text.len() {
        spans.push(InlineSpan::plain(&text[last..]));
    }
    spans
}

fn span_from_captures(caps: &Captures<'_>) -> Option<InlineSpan> {
    GROUP_KINDS
        .iter()
        .find_map(|&(group, kind)| caps.get(group).map(|m| InlineSpan::new(m.as_str(), kind)))
}

/// What a reader sees: the text of every span, markers removed.
pub fn strip_formatting(text: &str) -> String {
    tokenize(text).into_iter().map(|s| s.text).collect()
}

/// Whether `text` contains at least one complete inline marker pair.
pub fn has_formatting(text: &str) -> bool {
    inline_regex().is_some_and(|re| re.is_match(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(spans: &[InlineSpan]) -> Vec<(&str, FormatKind)> {
        spans.iter().map(|s| (s.text.as_str(), s.kind)).collect()
    }

    #[test]
    fn test_precedence() {
        let spans = tokenize("***x*** and **y** and *z*");
        assert_eq!(
            kinds(&spans),
            vec![
                ("x", FormatKind::BoldItalic),
                (" and ", FormatKind::Plain),
                ("y", FormatKind::Bold),
                (" and ", FormatKind::Plain),
                ("z", FormatKind::Italic),
            ]
        );
    }

    #[test]
    fn test_underscore_code_and_strike() {
        let spans = tokenize("___a___ __b__ _c_ `d` ~~e~~");
        assert_eq!(
            kinds(&spans),
            vec![
                ("a", FormatKind::BoldItalic),
                (" ", FormatKind::Plain),
                ("b", FormatKind::Bold),
                (" ", FormatKind::Plain),
                ("c", FormatKind::Italic),
                (" ", FormatKind::Plain),
                ("d", FormatKind::Code),
                (" ", FormatKind::Plain),
                ("e", FormatKind::Strikethrough),
            ]
        );
    }

    #[test]
    fn test_plain_string_is_single_span() {
        let spans = tokenize("Just some text.");
        assert_eq!(spans, vec![InlineSpan::plain("Just some text.")]);
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_unterminated_markers_stay_literal() {
        assert_eq!(strip_formatting("a * b"), "a * b");
        assert_eq!(strip_formatting("**open"), "**open");
        assert_eq!(strip_formatting("`tick"), "`tick");
        assert!(!has_formatting("2 * 3 = 6"));
    }

    #[test]
    fn test_non_nesting_interior_verbatim() {
        let spans = tokenize("**bold *inner* text**");
        assert_eq!(
            kinds(&spans),
            vec![("bold *inner* text", FormatKind::Bold)]
        );
    }

    #[test]
    fn test_strip_only_removes_delimiters() {
        let input = "Mix **b** with `c`, ~~s~~ and tail";
        assert_eq!(strip_formatting(input), "Mix b with c, s and tail");

        let plain = "no markers, only words 123";
        assert_eq!(strip_formatting(plain), plain);
    }

    #[test]
    fn test_kind_flags() {
        assert!(FormatKind::BoldItalic.is_bold());
        assert!(FormatKind::BoldItalic.is_italic());
        assert!(!FormatKind::Code.is_bold());
        assert!(FormatKind::Italic.is_italic());
    }
}
