//! Literal escaping and label generation.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Ordered `(literal, replacement)` pairs for one target.
pub type EscapeTable = &'static [(&'static str, &'static str)];

/// Markdown: inline markers, link brackets and table pipes.
pub const MARKDOWN_ESCAPES: EscapeTable = &[
    ("\\", "\\\\"),
    ("`", "\\`"),
    ("*", "\\*"),
    ("_", "\\_"),
    ("[", "\\["),
    ("]", "\\]"),
    ("|", "\\|"),
];

/// LaTeX special characters.
pub const LATEX_ESCAPES: EscapeTable = &[
    ("\\", "\\textbackslash{}"),
    ("&", "\\&"),
    ("%", "\\%"),
    ("$", "\\$"),
    ("#", "\\#"),
    ("_", "\\_"),
    ("{", "\\{"),
    ("}", "\\}"),
    ("~", "\\textasciitilde{}"),
    ("^", "\\textasciicircum{}"),
];

/// HTML text and attribute escapes.
pub const HTML_ESCAPES: EscapeTable = &[
    ("&", "&amp;"),
    ("<", "&lt;"),
    (">", "&gt;"),
    ("\"", "&quot;"),
    ("'", "&#39;"),
];

/// Plain text needs no escaping.
pub const NO_ESCAPES: EscapeTable = &[];

/// Maximum label length in characters.
pub const MAX_LABEL_LEN: usize = 30;

/// Escape `text` with a single left-to-right pass.
///
/// At each position the first table entry whose literal matches is
/// replaced; replacement text is never scanned again.
pub fn escape_with(text: &str, table: EscapeTable) -> String {
    if table.is_empty() {
        return text.to_string();
    }

    let mut result = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(c) = rest.chars().next() {
        match table
            .iter()
            .find(|(literal, _)| !literal.is_empty() && rest.starts_with(literal))
        {
            Some((literal, replacement)) => {
                result.push_str(replacement);
                rest = &rest[literal.len()..];
            }
            None => {
                result.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }
    result
}

/// A stable identifier for heading text.
///
/// Diacritics are folded, the text is lowercased, every character that is
/// not an ASCII letter or digit becomes `_`, and the result is cut to
/// [`MAX_LABEL_LEN`] characters.
///
/// # Example
/// ```
/// use docchunk::render::make_label;
///
/// assert_eq!(make_label("Chương 1: Tổng quan"), "chuong_1__tong_quan");
/// ```
pub fn make_label(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .take(MAX_LABEL_LEN)
        .collect()
}
