//! # docchunk
//!
//! Structural extraction, heading-based chunking and multi-format rendering
//! of document content.
//!
//! Styled text spans from a PDF or Word adapter (or a Markdown file) are
//! classified into a tree of sections and blocks, split into chunks at a
//! chosen heading depth, checked for lost content, and rendered to
//! Markdown, LaTeX, HTML, plain text or JSON.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docchunk::render::{Markdown, MarkupRenderer, RenderOptions, Renderer};
//! use docchunk::{parse_file, split_document};
//!
//! fn main() -> docchunk::Result<()> {
//!     let doc = parse_file("thesis.json")?;
//!     let chunks = split_document(&doc, 2);
//!
//!     let renderer = MarkupRenderer::new(Markdown);
//!     let options = RenderOptions::default();
//!     for chunk in &chunks {
//!         println!("{}", renderer.render_chunk(chunk, &options)?);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Two heuristic tables**: font metrics for PDF spans, style names for Word
//! - **Heading-level splitting** with a completeness check
//! - **Five targets** behind one `Renderer` trait and a registry
//! - **Parallel batches** with Rayon
//! - **Async source reads** with the `async` feature

pub mod convert;
pub mod detect;
pub mod error;
pub mod inline;
pub mod model;
pub mod parser;
pub mod render;
pub mod split;
pub mod verify;

// Re-export commonly used types
pub use convert::{
    BatchItem, DirectorySink, MemorySink, Pipeline, PipelineConfig, PipelineOutput,
    RenderSink, RenderedChunk,
};
pub use detect::{detect_heuristic, detect_input_format, HeuristicKind, InputFormat};
pub use error::{Error, Result, Warning};
pub use inline::{strip_formatting, tokenize, FormatKind, InlineSpan};
pub use model::{
    Alignment, Block, Document, ImageInfo, ListItem, Run, Section, TableCell, TableRow,
};
pub use parser::{ExtractOptions, Extraction, SpanSource, StructureParser, StyleDefaults};
pub use render::{
    JsonFormat, RenderOptions, Renderer, RendererRegistry, TargetFormat,
};
pub use split::{EmptyChunkPolicy, Splitter};
pub use verify::{verify_completeness, Completeness, VerifyOptions};

use std::path::Path;

/// Extract a document from a file with default options.
///
/// Warnings are logged and dropped; use [`StructureParser::parse_file`] to
/// keep them.
///
/// # Example
///
/// ```no_run
/// use docchunk::parse_file;
///
/// let doc = parse_file("notes.md").unwrap();
/// println!("Sections: {}", doc.section_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    let extraction = StructureParser::default().parse_file(path)?;
    Ok(extraction.document)
}

/// Extract a document from Markdown text.
///
/// # Example
///
/// ```
/// use docchunk::parse_markdown_str;
///
/// let doc = parse_markdown_str("# Intro\n\nHello, **world**.");
/// assert_eq!(doc.sections[0].title, "Intro");
/// ```
pub fn parse_markdown_str(text: &str) -> Document {
    StructureParser::default()
        .parse(&parser::parse_markdown(text))
        .document
}

/// Split a document at a heading level.
pub fn split_document(doc: &Document, level: u8) -> Vec<Section> {
    Splitter::new(level).split(doc)
}

/// Render a file to one target in a single output.
///
/// # Example
///
/// ```no_run
/// use docchunk::{render_file, TargetFormat};
///
/// let latex = render_file("thesis.json", TargetFormat::Latex).unwrap();
/// std::fs::write("thesis.tex", latex).unwrap();
/// ```
pub fn render_file<P: AsRef<Path>>(path: P, target: TargetFormat) -> Result<String> {
    let doc = parse_file(path)?;
    let renderer = RendererRegistry::with_defaults().get_format(target)?;
    renderer.render_document(&doc, &RenderOptions::default())
}

/// Convert a file to Markdown.
pub fn to_markdown<P: AsRef<Path>>(path: P) -> Result<String> {
    render_file(path, TargetFormat::Markdown)
}

/// Convert a file to LaTeX.
pub fn to_latex<P: AsRef<Path>>(path: P) -> Result<String> {
    render_file(path, TargetFormat::Latex)
}

/// Convert a file to plain text.
pub fn to_text<P: AsRef<Path>>(path: P) -> Result<String> {
    render_file(path, TargetFormat::Text)
}

/// Convert a file to JSON.
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let doc = parse_file(path)?;
    render::to_json(&doc, format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_file_missing() {
        let result = parse_file("does/not/exist.json");
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[test]
    fn test_parse_markdown_str() {
        let doc = parse_markdown_str("# One\n\n## Sub\n\ntext\n\n# Two\n");
        assert_eq!(doc.section_count(), 2);
        assert_eq!(doc.sections[0].blocks.len(), 2);
    }

    #[test]
    fn test_split_document() {
        let doc = parse_markdown_str("# One\n\n## A\n\nx\n\n## B\n\ny\n");
        let chunks = split_document(&doc, 2);
        let titles: Vec<&str> = chunks.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B"]);
    }

    #[test]
    fn test_render_file_markdown() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.md");
        std::fs::write(&path, "# Title\n\nBody *text*.\n").unwrap();

        let md = to_markdown(&path).unwrap();
        assert_eq!(md, "# Title\n\nBody *text*.\n");
    }
}
