//! Rendering result with statistics.

use crate::model::{Block, Document, Section};
use serde::{Deserialize, Serialize};

/// Result of rendering a document, including content and statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered content
    pub content: String,

    /// Document title
    pub title: String,

    /// Extraction statistics
    pub stats: ExtractionStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(content: String, title: impl Into<String>, stats: ExtractionStats) -> Self {
        Self {
            content,
            title: title.into(),
            stats,
        }
    }

    /// Get the content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

/// Counts of what a document or chunk set contains.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    pub section_count: u32,
    pub heading_count: u32,
    pub paragraph_count: u32,
    pub list_count: u32,
    pub list_item_count: u32,
    pub table_count: u32,
    pub image_count: u32,
    pub quote_count: u32,
    pub code_count: u32,
    pub page_break_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,
}

impl ExtractionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Statistics for a whole document.
    pub fn from_document(doc: &Document) -> Self {
        Self::from_sections(&doc.sections)
    }

    /// Statistics for a list of sections or chunks.
    pub fn from_sections(sections: &[Section]) -> Self {
        let mut stats = Self::new();
        for section in sections {
            stats.section_count += 1;
            stats.count_text(&section.title);
            for block in &section.blocks {
                stats.add_block(block);
            }
        }
        stats
    }

    /// Count one block and its text.
    pub fn add_block(&mut self, block: &Block) {
        match block {
            Block::Heading { .. } => self.heading_count += 1,
            Block::Paragraph { .. } => self.paragraph_count += 1,
            Block::List { items, .. } => {
                self.list_count += 1;
                self.list_item_count += items.len() as u32;
            }
            Block::Table { .. } => self.table_count += 1,
            Block::Image(_) => self.image_count += 1,
            Block::Quote { .. } => self.quote_count += 1,
            Block::Code { .. } => self.code_count += 1,
            Block::PageBreak => self.page_break_count += 1,
        }
        for line in block.text_lines() {
            self.count_text(&line);
        }
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &ExtractionStats) {
        self.section_count += other.section_count;
        self.heading_count += other.heading_count;
        self.paragraph_count += other.paragraph_count;
        self.list_count += other.list_count;
        self.list_item_count += other.list_item_count;
        self.table_count += other.table_count;
        self.image_count += other.image_count;
        self.quote_count += other.quote_count;
        self.code_count += other.code_count;
        self.page_break_count += other.page_break_count;
        self.word_count += other.word_count;
        self.char_count += other.char_count;
    }
}
