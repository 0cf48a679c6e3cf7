//! Run-level types.

use serde::{Deserialize, Serialize};

use crate::inline::strip_formatting;

/// A run of text with consistent styling.
///
/// Runs are the smallest styled unit kept in the tree. Builders never
/// persist a run with empty text into a block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Run {
    /// The text content
    pub text: String,

    /// Bold text
    #[serde(default)]
    pub bold: bool,

    /// Italic text
    #[serde(default)]
    pub italic: bool,

    /// Underlined text
    #[serde(default)]
    pub underline: bool,

    /// Font name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_name: Option<String>,

    /// Font size in points
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
}

impl Run {
    /// Create a new run with default style.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Create a bold run.
    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
            ..Default::default()
        }
    }

    /// Create an italic run.
    pub fn italic(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            italic: true,
            ..Default::default()
        }
    }

    /// Create a run with explicit bold/italic flags.
    pub fn styled(text: impl Into<String>, bold: bool, italic: bool) -> Self {
        Self {
            text: text.into(),
            bold,
            italic,
            ..Default::default()
        }
    }

    /// Check if this run is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Check if any styling is applied.
    pub fn has_styling(&self) -> bool {
        self.bold || self.italic || self.underline
    }
}

/// Concatenate what a reader sees for a sequence of runs.
///
/// Each run's text is passed through [`strip_formatting`] on its own, the
/// same granularity the renderers tokenize at.
pub fn runs_plain_text(runs: &[Run]) -> String {
    runs.iter().map(|r| strip_formatting(&r.text)).collect()
}

/// Text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Left alignment (default)
    #[default]
    Left,
    /// Center alignment
    Center,
    /// Right alignment
    Right,
    /// Justified alignment
    Justify,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_constructors() {
        let run = Run::bold("Title");
        assert!(run.bold);
        assert!(!run.italic);
        assert!(run.has_styling());

        let plain = Run::new("body");
        assert!(!plain.has_styling());
        assert!(!plain.is_empty());
        assert!(Run::new("").is_empty());
    }

    #[test]
    fn test_runs_plain_text_strips_markers() {
        let runs = vec![Run::new("Hello "), Run::new("**world**"), Run::new("!")];
        assert_eq!(runs_plain_text(&runs), "Hello world!");
    }
}
