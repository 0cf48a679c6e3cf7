//! Input format and heuristic detection.

use crate::parser::SpanSource;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How a file on disk is read into a span source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Markdown or plain text, read line by line
    Markdown,
    /// JSON span dump produced by an external PDF/Word adapter
    SpanDump,
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputFormat::Markdown => write!(f, "markdown"),
            InputFormat::SpanDump => write!(f, "span dump"),
        }
    }
}

/// Which classification table the extractor applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeuristicKind {
    /// Font size and weight only
    Metric,
    /// Named paragraph styles
    StyleName,
}

impl std::fmt::Display for HeuristicKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HeuristicKind::Metric => write!(f, "metric"),
            HeuristicKind::StyleName => write!(f, "style-name"),
        }
    }
}

/// Detect the input format from a file path.
///
/// `.md`, `.markdown` and `.txt` are read as Markdown; anything else is
/// expected to be a JSON span dump.
///
/// # Example
/// ```
/// use docchunk::detect::{detect_input_format, InputFormat};
///
/// assert_eq!(detect_input_format("notes.md"), InputFormat::Markdown);
/// assert_eq!(detect_input_format("report.json"), InputFormat::SpanDump);
/// ```
pub fn detect_input_format<P: AsRef<Path>>(path: P) -> InputFormat {
    let ext = path
        .as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    match ext.as_str() {
        "md" | "markdown" | "txt" => InputFormat::Markdown,
        _ => InputFormat::SpanDump,
    }
}

/// Pick the heuristic table for a source.
///
/// `pdf` sources use the metric table, `docx` and `markdown` sources the
/// style-name table. Unknown sources use the style-name table when any span
/// carries a style name.
pub fn detect_heuristic(source: &SpanSource) -> HeuristicKind {
    let source_type = source
        .source_type
        .as_deref()
        .map(str::to_lowercase)
        .unwrap_or_default();

    match source_type.as_str() {
        "pdf" => HeuristicKind::Metric,
        "docx" | "doc" | "markdown" => HeuristicKind::StyleName,
        _ if source.has_style_names() => HeuristicKind::StyleName,
        _ => HeuristicKind::Metric,
    }
}
