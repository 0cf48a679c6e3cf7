//! Completeness verification of a chunk set.
//!
//! A coarse line-set check: every trimmed non-blank line of the original
//! text must appear somewhere in the chunks' content. Order and whitespace
//! are not compared, so a false "incomplete" is possible for content that
//! renders differently from how it was written.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::Warning;
use crate::inline::strip_formatting;
use crate::model::Section;
use crate::parser::{is_separator_row, line_content, split_table_row};

/// Default cap on reported missing lines.
pub const DEFAULT_MAX_MISSING: usize = 10;

/// Options for [`verify_completeness`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyOptions {
    /// Treat the original as Markdown source and strip its markers first
    pub markdown_source: bool,

    /// Maximum number of missing lines reported
    pub max_missing: usize,
}

impl VerifyOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize Markdown block and inline markers in the original.
    pub fn markdown(mut self) -> Self {
        self.markdown_source = true;
        self
    }

    pub fn with_max_missing(mut self, max: usize) -> Self {
        self.max_missing = max;
        self
    }
}

impl Default for VerifyOptions {
    fn default() -> Self {
        Self {
            markdown_source: false,
            max_missing: DEFAULT_MAX_MISSING,
        }
    }
}

/// Result of a completeness check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completeness {
    pub is_complete: bool,

    /// Missing lines in first-appearance order, capped
    pub missing_lines: Vec<String>,
}

impl Completeness {
    /// A complete result.
    pub fn complete() -> Self {
        Self {
            is_complete: true,
            missing_lines: Vec::new(),
        }
    }

    /// The warning to attach when content is missing.
    pub fn warning(&self) -> Option<Warning> {
        (!self.is_complete).then(|| Warning::IncompleteSplit {
            missing: self.missing_lines.clone(),
        })
    }
}

/// Check that every line of `original` survives in `chunks`.
pub fn verify_completeness(
    original: &str,
    chunks: &[Section],
    options: &VerifyOptions,
) -> Completeness {
    let content = chunk_lines(chunks);
    let source_lines = if options.markdown_source {
        markdown_lines(original)
    } else {
        original
            .lines()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect()
    };

    let mut seen = HashSet::new();
    let mut missing = Vec::new();
    let mut missing_total = 0;
    for line in source_lines {
        if content.contains(&line) || !seen.insert(line.clone()) {
            continue;
        }
        missing_total += 1;
        if missing.len() < options.max_missing {
            missing.push(line);
        }
    }

    if missing_total > 0 {
        log::warn!(
            "{} source line(s) not found in {} chunk(s)",
            missing_total,
            chunks.len()
        );
        Completeness {
            is_complete: false,
            missing_lines: missing,
        }
    } else {
        Completeness::complete()
    }
}

/// Trimmed content lines of all chunks.
fn chunk_lines(chunks: &[Section]) -> HashSet<String> {
    let mut lines = HashSet::new();
    for chunk in chunks {
        for title in std::iter::once(&chunk.title).chain(chunk.parent_title.as_ref()) {
            lines.insert(title.trim().to_string());
            lines.insert(strip_formatting(title).trim().to_string());
        }
        for block in &chunk.blocks {
            lines.extend(block.text_lines().iter().map(|l| l.trim().to_string()));
        }
    }
    lines
}

/// Visible text of Markdown source lines, one entry per content line.
fn markdown_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut in_fence = false;

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with("```") {
            in_fence = !in_fence;
            continue;
        }
        if trimmed.is_empty() {
            continue;
        }
        if in_fence {
            lines.push(trimmed.to_string());
            continue;
        }
        if trimmed.starts_with('|') {
            if !is_separator_row(trimmed) {
                let cells: Vec<String> = split_table_row(trimmed)
                    .iter()
                    .map(|c| strip_formatting(c))
                    .collect();
                lines.push(cells.join(" | ").trim().to_string());
            }
            continue;
        }
        if let Some(content) = line_content(line) {
            let visible = strip_formatting(&content).trim().to_string();
            if !visible.is_empty() {
                lines.push(visible);
            }
        }
    }
    lines
}
