//! Document and section types.

use super::Block;
use serde::{Deserialize, Serialize};

/// Title given to a section created implicitly, before any level-1 heading.
pub const DEFAULT_SECTION_TITLE: &str = "Document";

/// A parsed document: metadata plus an ordered list of sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Document title
    #[serde(default)]
    pub title: String,

    /// Document author
    #[serde(default)]
    pub author: String,

    /// Sections in source order
    #[serde(default)]
    pub sections: Vec<Section>,

    /// Path of the source this document was extracted from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_path: Option<String>,

    /// Source kind, e.g. `"pdf"`, `"docx"`, `"markdown"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_type: Option<String>,
}

impl Document {
    /// Create a new empty document.
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            ..Default::default()
        }
    }

    /// Add a section to the document.
    pub fn add_section(&mut self, section: Section) {
        self.sections.push(section);
    }

    /// Get the number of sections.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Get the number of blocks across all sections.
    pub fn total_blocks(&self) -> usize {
        self.sections.iter().map(|s| s.blocks.len()).sum()
    }

    /// Check if the document has any sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// The document's text before splitting, one line per section title,
    /// heading, paragraph line, list item, table row, quote line and code
    /// line. This is the reference text for completeness verification.
    pub fn plain_text(&self) -> String {
        self.sections
            .iter()
            .flat_map(|s| s.text_lines())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A top-level structural unit, also the shape of a splitter chunk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Section title, never empty
    pub title: String,

    /// Heading level of the title (1-6)
    pub level: u8,

    /// Blocks in insertion order
    #[serde(default)]
    pub blocks: Vec<Block>,

    /// Title of the section a chunk was cut from, set by the splitter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_title: Option<String>,
}

impl Section {
    /// Create a new empty section. A blank title falls back to
    /// [`DEFAULT_SECTION_TITLE`] and the level is clamped to 1..=6.
    pub fn new(title: impl Into<String>, level: u8) -> Self {
        let title = title.into();
        let title = if title.trim().is_empty() {
            DEFAULT_SECTION_TITLE.to_string()
        } else {
            title
        };
        Self {
            title,
            level: level.clamp(1, 6),
            blocks: Vec::new(),
            parent_title: None,
        }
    }

    /// The implicit section used when content precedes any level-1 heading.
    pub fn placeholder() -> Self {
        Self::new(DEFAULT_SECTION_TITLE, 1)
    }

    /// Add a block.
    pub fn add_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Check if the section has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Title followed by every block's text lines.
    pub fn text_lines(&self) -> Vec<String> {
        std::iter::once(self.title.clone())
            .chain(self.blocks.iter().flat_map(|b| b.text_lines()))
            .collect()
    }

    /// Characters of block content, excluding the title.
    pub fn char_len(&self) -> usize {
        self.blocks.iter().map(|b| b.char_len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document {
        let mut doc = Document::new("Test Document", "Author");
        let mut chapter = Section::new("Chapter 1", 1);
        chapter.add_block(Block::heading("Introduction", 2));
        chapter.add_block(Block::paragraph("This is a test paragraph."));
        chapter.add_block(Block::list(["Item 1", "Item 2"], false));
        doc.add_section(chapter);
        doc
    }

    #[test]
    fn test_document_counts() {
        let doc = sample();
        assert!(!doc.is_empty());
        assert_eq!(doc.section_count(), 1);
        assert_eq!(doc.total_blocks(), 3);
        assert!(Document::default().is_empty());
    }

    #[test]
    fn test_plain_text_lines() {
        let text = sample().plain_text();
        assert_eq!(
            text,
            "Chapter 1\nIntroduction\nThis is a test paragraph.\nItem 1\nItem 2"
        );
    }

    #[test]
    fn test_section_title_placeholder() {
        let section = Section::new("   ", 0);
        assert_eq!(section.title, DEFAULT_SECTION_TITLE);
        assert_eq!(section.level, 1);
        assert_eq!(Section::placeholder().title, "Document");
    }
}
