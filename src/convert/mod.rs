//! The extract, split, verify and render pipeline.
//!
//! A [`Pipeline`] owns its configuration and renderer registry; there is no
//! global state, so independent pipelines can run side by side.
//!
//! # Example
//!
//! ```no_run
//! use docchunk::convert::{DirectorySink, Pipeline, PipelineConfig};
//! use docchunk::render::TargetFormat;
//!
//! fn main() -> docchunk::Result<()> {
//!     let config = PipelineConfig::new()
//!         .with_split_level(2)
//!         .with_target(TargetFormat::Latex);
//!     let pipeline = Pipeline::new(config);
//!
//!     let output = pipeline.process_file("thesis.json")?;
//!     let mut sink = DirectorySink::new("out")?;
//!     pipeline.export_chunks(&output, &mut sink)?;
//!     Ok(())
//! }
//! ```

mod config;
mod sink;

pub use config::PipelineConfig;
pub use sink::{DirectorySink, MemorySink, RenderSink};

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Result, Warning};
use crate::model::{Document, Section};
use crate::parser::{Extraction, SpanSource, StructureParser};
use crate::render::{ChunkFile, ExtractionStats, RenderResult, Renderer, RendererRegistry};
use crate::verify::{verify_completeness, Completeness, VerifyOptions};

/// Characters of a title kept in a chunk file name.
const FILE_TITLE_LEN: usize = 30;

/// One rendered output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedChunk {
    pub file_name: String,
    pub title: String,
    pub content: String,
}

/// Everything the pipeline produced for one document.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub document_title: String,

    /// Chunks in document order
    pub chunks: Vec<Section>,

    /// One rendered file per chunk, same order as `chunks`
    pub rendered: Vec<RenderedChunk>,

    /// Index listing the chunk files; absent when there are no chunks
    pub index: Option<RenderedChunk>,

    pub completeness: Completeness,

    /// Extraction and verification warnings
    pub warnings: Vec<Warning>,

    /// Counts over the chunk set
    pub stats: ExtractionStats,
}

impl PipelineOutput {
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Result of one file in a batch.
#[derive(Debug)]
pub struct BatchItem {
    pub path: PathBuf,
    pub result: Result<PipelineOutput>,
}

/// Extracts, splits, verifies and renders documents.
#[derive(Debug)]
pub struct Pipeline {
    config: PipelineConfig,
    parser: StructureParser,
    registry: RendererRegistry,
}

impl Pipeline {
    /// Create a pipeline with the built-in renderers.
    pub fn new(config: PipelineConfig) -> Self {
        Self::with_registry(config, RendererRegistry::with_defaults())
    }

    /// Create a pipeline with a custom renderer registry.
    pub fn with_registry(config: PipelineConfig, registry: RendererRegistry) -> Self {
        let parser = StructureParser::new(config.extract_options());
        Self {
            config,
            parser,
            registry,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn registry(&self) -> &RendererRegistry {
        &self.registry
    }

    /// Register an additional renderer.
    pub fn register_renderer(&mut self, renderer: Arc<dyn Renderer>) {
        self.registry.register(renderer);
    }

    /// The renderer for the configured target.
    pub fn renderer(&self) -> Result<Arc<dyn Renderer>> {
        self.registry.get_format(self.config.target)
    }

    /// Read and classify a file.
    pub fn extract_file<P: AsRef<Path>>(&self, path: P) -> Result<Extraction> {
        self.parser.parse_file(path)
    }

    /// Read a file asynchronously, then classify it.
    #[cfg(feature = "async")]
    pub async fn extract_file_async<P: AsRef<Path>>(&self, path: P) -> Result<Extraction> {
        let path = path.as_ref();
        let data = match tokio::fs::read(path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(crate::error::Error::NotFound(path.to_path_buf()))
            }
            Err(e) => return Err(e.into()),
        };
        let format = crate::detect::detect_input_format(path);
        Ok(self.parser.parse_bytes(&data, format, path))
    }

    /// Classify an in-memory span source.
    pub fn extract_source(&self, source: &SpanSource) -> Extraction {
        self.parser.parse(source)
    }

    /// Classify Markdown text.
    pub fn extract_markdown(&self, text: &str) -> Extraction {
        self.parser.parse_markdown_text(text)
    }

    /// Split a document at the configured level.
    pub fn split(&self, document: &Document) -> Vec<Section> {
        self.config.splitter().split(document)
    }

    /// Check that the chunks carry every line of the document.
    pub fn verify(&self, document: &Document, chunks: &[Section]) -> Completeness {
        verify_completeness(&document.plain_text(), chunks, &VerifyOptions::default())
    }

    /// Check that the chunks carry every content line of Markdown source text.
    ///
    /// Unlike [`verify`](Self::verify), this also catches lines the reader
    /// dropped before the document was built.
    pub fn verify_source(&self, markdown: &str, chunks: &[Section]) -> Completeness {
        verify_completeness(markdown, chunks, &VerifyOptions::new().markdown())
    }

    /// Render a whole document with the configured target.
    pub fn render_document(&self, document: &Document) -> Result<RenderResult> {
        let renderer = self.renderer()?;
        let content = renderer.render_document(document, &self.config.render)?;
        Ok(RenderResult::new(
            content,
            document.title.clone(),
            ExtractionStats::from_document(document),
        ))
    }

    /// Render each chunk as its own file, plus the index.
    pub fn render_chunks(
        &self,
        title: &str,
        chunks: &[Section],
    ) -> Result<(Vec<RenderedChunk>, Option<RenderedChunk>)> {
        let renderer = self.renderer()?;
        let options = &self.config.render;

        let mut rendered = Vec::with_capacity(chunks.len());
        for (i, chunk) in chunks.iter().enumerate() {
            rendered.push(RenderedChunk {
                file_name: chunk_file_name(i + 1, &chunk.title, renderer.extension()),
                title: chunk.title.clone(),
                content: renderer.render_chunk(chunk, options)?,
            });
        }

        let index = if rendered.is_empty() {
            None
        } else {
            let files: Vec<ChunkFile> = rendered
                .iter()
                .map(|r| ChunkFile::new(r.file_name.clone(), r.title.clone()))
                .collect();
            Some(RenderedChunk {
                file_name: renderer.index_file_name(),
                title: title.to_string(),
                content: renderer.render_index(title, &files, options)?,
            })
        };

        log::debug!(
            "Rendered {} chunk(s) as {}",
            rendered.len(),
            renderer.name()
        );
        Ok((rendered, index))
    }

    /// Extract, split, verify and render one file.
    pub fn process_file<P: AsRef<Path>>(&self, path: P) -> Result<PipelineOutput> {
        let extraction = self.extract_file(path)?;
        self.process_extraction(extraction)
    }

    /// Split, verify and render an in-memory span source.
    pub fn process_source(&self, source: &SpanSource) -> Result<PipelineOutput> {
        self.process_extraction(self.extract_source(source))
    }

    /// Split, verify and render an extraction.
    pub fn process_extraction(&self, extraction: Extraction) -> Result<PipelineOutput> {
        let Extraction {
            document,
            mut warnings,
            source_text,
        } = extraction;

        let chunks = self.split(&document);
        let completeness = match &source_text {
            Some(text) => self.verify_source(text, &chunks),
            None => self.verify(&document, &chunks),
        };
        if let Some(warning) = completeness.warning() {
            warnings.push(warning);
        }

        let (rendered, index) = self.render_chunks(&document.title, &chunks)?;
        let stats = ExtractionStats::from_sections(&chunks);

        Ok(PipelineOutput {
            document_title: document.title,
            chunks,
            rendered,
            index,
            completeness,
            warnings,
            stats,
        })
    }

    /// Process files independently; one failure never stops the others.
    pub fn process_batch<P: AsRef<Path> + Sync>(&self, paths: &[P]) -> Vec<BatchItem> {
        let process = |path: &P| BatchItem {
            path: path.as_ref().to_path_buf(),
            result: self.process_file(path),
        };

        let items: Vec<BatchItem> = if self.config.parallel {
            paths.par_iter().map(process).collect()
        } else {
            paths.iter().map(process).collect()
        };

        let failed = items.iter().filter(|i| i.result.is_err()).count();
        if failed > 0 {
            log::warn!("{} of {} file(s) failed", failed, items.len());
        }
        items
    }

    /// Render the whole document into one file; returns its name.
    pub fn export_single<S: RenderSink + ?Sized>(
        &self,
        document: &Document,
        sink: &mut S,
    ) -> Result<String> {
        let renderer = self.renderer()?;
        let content = renderer.render_document(document, &self.config.render)?;
        let name = format!("{}.{}", file_title(&document.title), renderer.extension());
        sink.write(&name, &content)?;
        Ok(name)
    }

    /// Write every rendered chunk and the index; returns the names written.
    pub fn export_chunks<S: RenderSink + ?Sized>(
        &self,
        output: &PipelineOutput,
        sink: &mut S,
    ) -> Result<Vec<String>> {
        let mut names = Vec::with_capacity(output.rendered.len() + 1);
        for file in output.rendered.iter().chain(output.index.iter()) {
            sink.write(&file.file_name, &file.content)?;
            names.push(file.file_name.clone());
        }
        Ok(names)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

/// File name of the `index`-th chunk (1-based).
///
/// ```
/// use docchunk::convert::chunk_file_name;
///
/// assert_eq!(chunk_file_name(3, "Results: 2024/25", "md"), "chunk_003_Results_ 2024_25.md");
/// ```
pub fn chunk_file_name(index: usize, title: &str, extension: &str) -> String {
    format!("chunk_{:03}_{}.{}", index, file_title(title), extension)
}

/// A title reduced to characters safe in file names.
fn file_title(title: &str) -> String {
    let safe: String = title
        .chars()
        .take(FILE_TITLE_LEN)
        .map(|c| {
            if c.is_alphanumeric() || c == ' ' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let safe = safe.trim();
    if safe.is_empty() {
        "document".to_string()
    } else {
        safe.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Block;
    use crate::render::TargetFormat;

    fn sample() -> Document {
        let mut doc = Document::new("Thesis", "");
        let mut one = Section::new("Chapter 1", 1);
        one.add_block(Block::heading("Background", 2));
        one.add_block(Block::paragraph("First."));
        one.add_block(Block::heading("Method", 2));
        one.add_block(Block::paragraph("Second."));
        doc.add_section(one);
        doc
    }

    #[test]
    fn test_file_title() {
        assert_eq!(file_title("Chương 1: Mở đầu"), "Chương 1_ Mở đầu");
        assert_eq!(file_title("  ?? "), "__");
        assert_eq!(file_title("   "), "document");
        assert_eq!(file_title(&"x".repeat(40)).len(), 30);
    }

    #[test]
    fn test_chunk_file_name() {
        assert_eq!(chunk_file_name(1, "Intro", "tex"), "chunk_001_Intro.tex");
        assert_eq!(chunk_file_name(12, "a/b", "md"), "chunk_012_a_b.md");
    }

    #[test]
    fn test_render_chunks_with_index() {
        let pipeline = Pipeline::new(
            PipelineConfig::new()
                .with_split_level(2)
                .with_target(TargetFormat::Latex),
        );
        let doc = sample();
        let chunks = pipeline.split(&doc);
        assert_eq!(chunks.len(), 2);

        let (rendered, index) = pipeline.render_chunks(&doc.title, &chunks).unwrap();
        assert_eq!(rendered[0].file_name, "chunk_001_Background.tex");
        assert_eq!(rendered[1].file_name, "chunk_002_Method.tex");

        let index = index.unwrap();
        assert_eq!(index.file_name, "main.tex");
        assert!(index.content.contains("\\input{chunk_001_Background}"));
    }

    #[test]
    fn test_render_chunks_empty() {
        let pipeline = Pipeline::default();
        let (rendered, index) = pipeline.render_chunks("T", &[]).unwrap();
        assert!(rendered.is_empty());
        assert!(index.is_none());
    }

    #[test]
    fn test_process_extraction_verifies() {
        let pipeline = Pipeline::new(PipelineConfig::new().with_split_level(2));
        let output = pipeline
            .process_extraction(Extraction {
                document: sample(),
                warnings: Vec::new(),
                source_text: None,
            })
            .unwrap();

        assert!(output.completeness.is_complete);
        assert!(!output.has_warnings());
        assert_eq!(output.chunk_count(), 2);
        assert_eq!(output.stats.section_count, 2);
        assert_eq!(output.rendered.len(), 2);
    }

    #[test]
    fn test_export_single() {
        let pipeline = Pipeline::default();
        let mut sink = MemorySink::new();
        let name = pipeline.export_single(&sample(), &mut sink).unwrap();
        assert_eq!(name, "Thesis.md");
        assert!(sink.get("Thesis.md").unwrap().starts_with("# Chapter 1"));
    }
}
