//! Heading-based document splitting.

use serde::{Deserialize, Serialize};

use crate::model::{runs_plain_text, Block, Document, Run, Section};

/// Default advisory chunk size in characters.
pub const DEFAULT_MAX_CHARS: usize = 6000;

/// What happens to a chunk that closes without blocks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyChunkPolicy {
    /// Drop empty chunks, except a section's only chunk
    #[default]
    Prune,
    /// Keep every chunk, including empty placeholders
    Preserve,
}

/// Re-chunks a document by heading depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Splitter {
    split_level: u8,
    max_chars: usize,
    empty_chunks: EmptyChunkPolicy,
}

impl Splitter {
    /// Create a splitter. The level is clamped to at least 1.
    pub fn new(split_level: u8) -> Self {
        Self {
            split_level: split_level.max(1),
            max_chars: DEFAULT_MAX_CHARS,
            empty_chunks: EmptyChunkPolicy::default(),
        }
    }

    /// Set the advisory chunk size.
    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    /// Set the empty chunk policy.
    pub fn with_empty_chunks(mut self, policy: EmptyChunkPolicy) -> Self {
        self.empty_chunks = policy;
        self
    }

    pub fn split_level(&self) -> u8 {
        self.split_level
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    /// Split a document into section-shaped chunks.
    ///
    /// At level 1 the document's sections are returned unchanged. Deeper
    /// levels cut every section at headings of that level or shallower.
    pub fn split(&self, document: &Document) -> Vec<Section> {
        let chunks: Vec<Section> = if self.split_level == 1 {
            document.sections.clone()
        } else {
            document
                .sections
                .iter()
                .flat_map(|section| self.split_section(section))
                .collect()
        };

        let oversized = self.oversized(&chunks);
        for &i in &oversized {
            log::warn!(
                "Chunk {} '{}' has {} chars, over the {} char limit",
                i + 1,
                chunks[i].title,
                chunks[i].char_len(),
                self.max_chars
            );
        }
        log::debug!(
            "Split {} section(s) into {} chunk(s) at level {}",
            document.section_count(),
            chunks.len(),
            self.split_level
        );
        chunks
    }

    /// Indices of chunks whose content exceeds `max_chars`.
    pub fn oversized(&self, chunks: &[Section]) -> Vec<usize> {
        chunks
            .iter()
            .enumerate()
            .filter(|(_, c)| c.char_len() > self.max_chars)
            .map(|(i, _)| i)
            .collect()
    }

    fn split_section(&self, section: &Section) -> Vec<Section> {
        if section.blocks.is_empty() {
            return vec![section.clone()];
        }

        let mut chunks = Vec::new();
        let mut current = Section {
            title: section.title.clone(),
            level: section.level,
            blocks: Vec::new(),
            parent_title: section.parent_title.clone(),
        };

        for block in &section.blocks {
            match block {
                Block::Heading { level, runs } if *level <= self.split_level => {
                    let next = Section {
                        title: heading_title(runs, &section.title),
                        level: *level,
                        blocks: Vec::new(),
                        parent_title: Some(section.title.clone()),
                    };
                    let closed = std::mem::replace(&mut current, next);
                    if !closed.blocks.is_empty() || self.empty_chunks == EmptyChunkPolicy::Preserve {
                        chunks.push(closed);
                    }
                }
                _ => current.blocks.push(block.clone()),
            }
        }

        if !current.blocks.is_empty()
            || chunks.is_empty()
            || self.empty_chunks == EmptyChunkPolicy::Preserve
        {
            chunks.push(current);
        }
        chunks
    }
}

impl Default for Splitter {
    fn default() -> Self {
        Self::new(1)
    }
}

fn heading_title(runs: &[Run], fallback: &str) -> String {
    let text = runs_plain_text(runs);
    let text = text.trim();
    if text.is_empty() {
        fallback.to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chapter() -> Section {
        let mut section = Section::new("Chapter 1", 1);
        section.add_block(Block::heading("A", 2));
        section.add_block(Block::paragraph("p1"));
        section.add_block(Block::heading("B", 2));
        section.add_block(Block::paragraph("p2"));
        section
    }

    fn doc_with(sections: Vec<Section>) -> Document {
        let mut doc = Document::new("Doc", "");
        doc.sections = sections;
        doc
    }

    #[test]
    fn test_level_one_is_identity() {
        let doc = doc_with(vec![chapter(), Section::new("Chapter 2", 1)]);
        assert_eq!(Splitter::new(1).split(&doc), doc.sections);
        assert_eq!(Splitter::new(0).split_level(), 1);
    }

    #[test]
    fn test_level_two_scenario() {
        let chunks = Splitter::new(2).split(&doc_with(vec![chapter()]));

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].title, "A");
        assert_eq!(chunks[1].title, "B");
        for chunk in &chunks {
            assert_eq!(chunk.level, 2);
            assert_eq!(chunk.blocks.len(), 1);
            assert_eq!(chunk.parent_title.as_deref(), Some("Chapter 1"));
            assert!(matches!(chunk.blocks[0], Block::Paragraph { .. }));
        }
    }

    #[test]
    fn test_preserve_keeps_placeholders() {
        let chunks = Splitter::new(2)
            .with_empty_chunks(EmptyChunkPolicy::Preserve)
            .split(&doc_with(vec![chapter()]));

        let titles: Vec<&str> = chunks.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Chapter 1", "A", "B"]);
        assert!(chunks[0].blocks.is_empty());
        assert_eq!(chunks[0].parent_title, None);
    }

    #[test]
    fn test_empty_section_yields_one_chunk() {
        let chunks = Splitter::new(3).split(&doc_with(vec![Section::new("Empty", 1)]));
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].title, "Empty");
        assert!(chunks[0].blocks.is_empty());

        assert!(Splitter::new(2).split(&Document::default()).is_empty());
    }

    #[test]
    fn test_deeper_headings_stay_inside() {
        let mut section = Section::new("Ch", 1);
        section.add_block(Block::paragraph("intro"));
        section.add_block(Block::heading("Deep", 3));
        section.add_block(Block::paragraph("body"));

        let chunks = Splitter::new(2).split(&doc_with(vec![section]));
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].title, "Ch");
        assert_eq!(chunks[0].blocks.len(), 3);
    }

    #[test]
    fn test_heading_without_text_uses_section_title() {
        let mut section = Section::new("Ch", 1);
        section.add_block(Block::paragraph("intro"));
        section.add_block(Block::heading_runs(vec![Run::new("  ")], 2));
        section.add_block(Block::paragraph("body"));

        let chunks = Splitter::new(2).split(&doc_with(vec![section]));
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[1].title, "Ch");
    }

    #[test]
    fn test_oversized_is_advisory() {
        let mut section = Section::new("Big", 1);
        section.add_block(Block::paragraph("x".repeat(50)));
        let doc = doc_with(vec![section]);

        let splitter = Splitter::new(1).with_max_chars(10);
        let chunks = splitter.split(&doc);
        assert_eq!(chunks[0].char_len(), 50);
        assert_eq!(splitter.oversized(&chunks), vec![0]);
    }
}
