//! Block-level types.

use super::{runs_plain_text, Alignment, Run, TableRow};
use serde::{Deserialize, Serialize};

/// Lowest heading level a block can carry. Level 1 opens a section instead.
pub const MIN_BLOCK_HEADING_LEVEL: u8 = 2;

/// Highest heading level.
pub const MAX_HEADING_LEVEL: u8 = 6;

/// A structural element within a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A heading below section level (2-6)
    Heading {
        /// Heading level, always within 2..=6
        level: u8,
        /// Heading text
        runs: Vec<Run>,
    },

    /// A paragraph of text
    Paragraph {
        /// Text runs
        runs: Vec<Run>,
        /// Paragraph alignment
        #[serde(default)]
        alignment: Alignment,
    },

    /// An ordered or unordered list
    List {
        /// Whether items are numbered
        ordered: bool,
        /// Items in source order
        items: Vec<ListItem>,
    },

    /// A table
    Table {
        /// Rows; the first row is the header when extracted from a source
        rows: Vec<TableRow>,
    },

    /// An image reference
    Image(ImageInfo),

    /// A block quote
    Quote {
        /// Quoted text
        runs: Vec<Run>,
    },

    /// Verbatim code
    Code {
        /// Language hint
        #[serde(default, skip_serializing_if = "Option::is_none")]
        lang: Option<String>,
        /// Code text, taken verbatim
        text: String,
    },

    /// A page break marker
    PageBreak,
}

impl Block {
    /// Create a heading block from plain text. The level is clamped to 2..=6.
    pub fn heading(text: impl Into<String>, level: u8) -> Self {
        Self::heading_runs(vec![Run::bold(text)], level)
    }

    /// Create a heading block from runs. The level is clamped to 2..=6.
    pub fn heading_runs(runs: Vec<Run>, level: u8) -> Self {
        Block::Heading {
            level: level.clamp(MIN_BLOCK_HEADING_LEVEL, MAX_HEADING_LEVEL),
            runs,
        }
    }

    /// Create a left-aligned paragraph with one plain run.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::paragraph_runs(vec![Run::new(text)])
    }

    /// Create a left-aligned paragraph from runs.
    pub fn paragraph_runs(runs: Vec<Run>) -> Self {
        Block::Paragraph {
            runs,
            alignment: Alignment::Left,
        }
    }

    /// Create a list with one plain run per item.
    pub fn list<S: Into<String>>(items: impl IntoIterator<Item = S>, ordered: bool) -> Self {
        Block::List {
            ordered,
            items: items
                .into_iter()
                .map(|s| ListItem::new(vec![Run::new(s)], 0))
                .collect(),
        }
    }

    /// Create a quote with one plain run.
    pub fn quote(text: impl Into<String>) -> Self {
        Block::Quote {
            runs: vec![Run::new(text)],
        }
    }

    /// Create a code block.
    pub fn code(lang: Option<String>, text: impl Into<String>) -> Self {
        Block::Code {
            lang,
            text: text.into(),
        }
    }

    /// Short name of the variant, used in logs and statistics.
    pub fn kind(&self) -> &'static str {
        match self {
            Block::Heading { .. } => "heading",
            Block::Paragraph { .. } => "paragraph",
            Block::List { .. } => "list",
            Block::Table { .. } => "table",
            Block::Image(_) => "image",
            Block::Quote { .. } => "quote",
            Block::Code { .. } => "code",
            Block::PageBreak => "page_break",
        }
    }

    /// Heading level if this is a heading.
    pub fn heading_level(&self) -> Option<u8> {
        match self {
            Block::Heading { level, .. } => Some(*level),
            _ => None,
        }
    }

    /// The text lines a reader sees for this block.
    ///
    /// Inline markers are stripped; code is kept verbatim. A table row is one
    /// line with its cells joined by `" | "`. Blank lines are dropped.
    pub fn text_lines(&self) -> Vec<String> {
        let lines: Vec<String> = match self {
            Block::Heading { runs, .. } | Block::Quote { runs } => {
                split_lines(&runs_plain_text(runs))
            }
            Block::Paragraph { runs, .. } => split_lines(&runs_plain_text(runs)),
            Block::List { items, .. } => items.iter().map(|i| i.plain_text()).collect(),
            Block::Table { rows } => rows.iter().map(|r| r.plain_text()).collect(),
            Block::Image(image) => image.caption.iter().cloned().collect(),
            Block::Code { text, .. } => split_lines(text),
            Block::PageBreak => Vec::new(),
        };
        lines
            .into_iter()
            .filter(|l| !l.trim().is_empty())
            .collect()
    }

    /// Plain text of the block, lines joined with `\n`.
    pub fn plain_text(&self) -> String {
        self.text_lines().join("\n")
    }

    /// Number of characters the block contributes to plain text.
    pub fn char_len(&self) -> usize {
        self.text_lines().iter().map(|l| l.chars().count()).sum()
    }
}

fn split_lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
}

/// An item in a list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    /// Item text
    pub content: Vec<Run>,

    /// Nesting level (0 = top level)
    #[serde(default)]
    pub indent_level: u8,
}

impl ListItem {
    /// Create a new list item.
    pub fn new(content: Vec<Run>, indent_level: u8) -> Self {
        Self {
            content,
            indent_level,
        }
    }

    /// Get plain text content.
    pub fn plain_text(&self) -> String {
        runs_plain_text(&self.content)
    }
}

/// An image reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageInfo {
    /// Resolved image path; `None` until an external resolver fills it in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Caption text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,

    /// Where the image came from in the source
    #[serde(default)]
    pub metadata: ImageMetadata,
}

impl ImageInfo {
    /// Create an image with a known path.
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            ..Default::default()
        }
    }

    /// Set the caption and return self.
    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }
}

/// Source location of an image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageMetadata {
    /// Zero-based page index
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    /// Bounding box `[x0, y0, x1, y1]` in points
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<[f32; 4]>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TableCell;

    #[test]
    fn test_heading_level_clamped() {
        assert_eq!(Block::heading("a", 1).heading_level(), Some(2));
        assert_eq!(Block::heading("a", 3).heading_level(), Some(3));
        assert_eq!(Block::heading("a", 9).heading_level(), Some(6));
        assert_eq!(Block::paragraph("a").heading_level(), None);
    }

    #[test]
    fn test_text_lines_per_variant() {
        assert_eq!(
            Block::list(["one", "two"], false).text_lines(),
            vec!["one", "two"]
        );

        let table = Block::Table {
            rows: vec![
                TableRow::header(vec![TableCell::text("A"), TableCell::text("B")]),
                TableRow::from_strings(["1", "2"]),
            ],
        };
        assert_eq!(table.text_lines(), vec!["A | B", "1 | 2"]);

        let code = Block::code(Some("rust".into()), "fn main() {\n\n    *x*\n}");
        assert_eq!(code.text_lines(), vec!["fn main() {", "    *x*", "}"]);

        assert!(Block::PageBreak.text_lines().is_empty());
        assert!(Block::Image(ImageInfo::default()).text_lines().is_empty());
        assert_eq!(
            Block::Image(ImageInfo::with_path("a.png").caption("Figure 1")).text_lines(),
            vec!["Figure 1"]
        );
    }

    #[test]
    fn test_paragraph_markers_stripped() {
        let block = Block::paragraph("Mix of **bold** and *italic*");
        assert_eq!(block.plain_text(), "Mix of bold and italic");
        assert_eq!(block.char_len(), "Mix of bold and italic".len());
    }

    #[test]
    fn test_serde_tagging() {
        let json = serde_json::to_string(&Block::PageBreak).unwrap();
        assert_eq!(json, r#"{"type":"page_break"}"#);

        let block: Block =
            serde_json::from_str(r#"{"type":"code","text":"x = 1"}"#).unwrap();
        assert_eq!(block, Block::code(None, "x = 1"));
    }
}
