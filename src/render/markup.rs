//! Renderer traits and the shared markup tree walker.
//!
//! Every text target implements [`MarkupTarget`]: an escape table, a label
//! generator, inline style constructs and one emitter per block kind. A
//! [`MarkupRenderer`] walks the document tree once and asks the target for
//! each piece, so block dispatch and inline tokenization live in one place.

use serde::{Deserialize, Serialize};

use super::escape::{escape_with, make_label, EscapeTable};
use super::options::RenderOptions;
use crate::error::Result;
use crate::inline::{tokenize, FormatKind, InlineSpan};
use crate::model::{column_count, Alignment, Block, Document, ImageInfo, Run, Section};

/// One file of a multi-file export, as listed in the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkFile {
    /// File name including extension
    pub file_name: String,

    /// Chunk title
    pub title: String,
}

impl ChunkFile {
    pub fn new(file_name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            title: title.into(),
        }
    }

    /// File name without its extension.
    pub fn stem(&self) -> &str {
        self.file_name
            .rsplit_once('.')
            .map(|(stem, _)| stem)
            .unwrap_or(&self.file_name)
    }
}

/// A renderer for one target format.
///
/// Implement this trait to add an output format; register it with a
/// [`RendererRegistry`](super::RendererRegistry).
pub trait Renderer: Send + Sync {
    /// Name of the target, e.g. `"md"`.
    fn name(&self) -> &str;

    /// File extension without the leading dot.
    fn extension(&self) -> &str;

    /// Render a whole document as one output.
    fn render_document(&self, doc: &Document, options: &RenderOptions) -> Result<String>;

    /// Render one chunk as a standalone output.
    fn render_chunk(&self, chunk: &Section, options: &RenderOptions) -> Result<String>;

    /// Render the index listing chunk files in order.
    fn render_index(
        &self,
        title: &str,
        files: &[ChunkFile],
        options: &RenderOptions,
    ) -> Result<String>;

    /// File name of the index.
    fn index_file_name(&self) -> String {
        format!("index.{}", self.extension())
    }
}

/// A list item after inline rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedItem {
    pub indent: u8,
    pub text: String,
}

/// A table after inline rendering, rectangular.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTable {
    pub columns: usize,

    /// Rows padded or folded to `columns` cells
    pub rows: Vec<Vec<String>>,

    /// Whether the first row is a header
    pub has_header: bool,
}

/// Target-specific constructs for a text markup format.
///
/// Inline arguments arrive already escaped and styled. Raw arguments
/// (`raw_title`, code text) are unescaped.
pub trait MarkupTarget: Send + Sync {
    fn name(&self) -> &'static str;

    fn extension(&self) -> &'static str;

    /// Literal escapes applied to text fragments.
    fn escapes(&self) -> EscapeTable;

    /// Anchor or label for heading text.
    fn label(&self, text: &str) -> String {
        make_label(text)
    }

    fn bold(&self, text: &str) -> String;

    fn italic(&self, text: &str) -> String;

    fn bold_italic(&self, text: &str) -> String;

    /// Inline code from raw text.
    fn code(&self, raw: &str) -> String;

    fn strike(&self, text: &str) -> String;

    fn underline(&self, text: &str) -> String {
        text.to_string()
    }

    /// A section or chunk title at its level.
    fn section_title(&self, inline: &str, raw_title: &str, level: u8) -> String;

    /// A heading block, level 2-6.
    fn heading(&self, inline: &str, raw_title: &str, level: u8) -> String;

    fn paragraph(&self, inline: &str, alignment: Alignment) -> String;

    fn list(&self, ordered: bool, items: &[RenderedItem], options: &RenderOptions) -> String;

    fn table(&self, table: &RenderedTable) -> String;

    fn quote(&self, inline: &str) -> String;

    /// An image; `caption` is already escaped.
    fn image(&self, image: &ImageInfo, caption: Option<&str>, options: &RenderOptions) -> String;

    fn code_block(&self, lang: Option<&str>, raw: &str) -> String;

    fn page_break(&self) -> String;

    /// Wrap rendered sections into a complete document.
    fn document(&self, doc: &Document, sections: &[String], options: &RenderOptions) -> String;

    /// Wrap one rendered chunk into a standalone output.
    fn chunk(&self, _chunk: &Section, body: String, _options: &RenderOptions) -> String {
        body
    }

    /// Index of chunk files.
    fn index(&self, title: &str, files: &[ChunkFile], options: &RenderOptions) -> String;

    fn index_file_name(&self) -> String {
        format!("index.{}", self.extension())
    }
}

/// Walks the document tree for a [`MarkupTarget`].
#[derive(Debug, Clone, Default)]
pub struct MarkupRenderer<T> {
    target: T,
}

impl<T: MarkupTarget> MarkupRenderer<T> {
    /// Create a renderer for a target.
    pub fn new(target: T) -> Self {
        Self { target }
    }

    /// Get the target.
    pub fn target(&self) -> &T {
        &self.target
    }

    /// Render one section's title and blocks.
    pub fn render_section(&self, section: &Section, options: &RenderOptions) -> String {
        let mut out = String::new();
        let title = self.escape(&section.title, options);
        out.push_str(&self.target.section_title(&title, &section.title, section.level));
        for block in &section.blocks {
            out.push_str(&self.render_block(block, options));
        }
        out
    }

    /// Render a single block.
    pub fn render_block(&self, block: &Block, options: &RenderOptions) -> String {
        match block {
            Block::Heading { level, runs } => {
                let raw: String = crate::model::runs_plain_text(runs);
                let inline = self.render_runs(runs, options, true);
                self.target.heading(&inline, raw.trim(), *level)
            }
            Block::Paragraph { runs, alignment } => {
                let inline = self.render_runs(runs, options, false);
                if inline.trim().is_empty() {
                    return String::new();
                }
                self.target.paragraph(&inline, *alignment)
            }
            Block::List { ordered, items } => {
                let mut items: Vec<RenderedItem> = items
                    .iter()
                    .map(|item| RenderedItem {
                        indent: item.indent_level,
                        text: self.render_runs(&item.content, options, false),
                    })
                    .collect();
                clamp_indents(&mut items);
                if items.is_empty() {
                    return String::new();
                }
                self.target.list(*ordered, &items, options)
            }
            Block::Table { rows } => {
                let columns = column_count(rows);
                if columns == 0 {
                    return String::new();
                }
                let rendered = rows
                    .iter()
                    .map(|row| {
                        let cells: Vec<String> = row
                            .cells
                            .iter()
                            .map(|cell| self.render_runs(&cell.content, options, false))
                            .collect();
                        fit_row(cells, columns)
                    })
                    .collect();
                self.target.table(&RenderedTable {
                    columns,
                    rows: rendered,
                    has_header: rows.first().is_some_and(|r| r.is_header),
                })
            }
            Block::Image(image) => {
                let caption = image.caption.as_deref().map(|c| self.escape(c, options));
                self.target.image(image, caption.as_deref(), options)
            }
            Block::Quote { runs } => {
                let inline = self.render_runs(runs, options, false);
                self.target.quote(&inline)
            }
            Block::Code { lang, text } => self.target.code_block(lang.as_deref(), text),
            Block::PageBreak => self.target.page_break(),
        }
    }

    /// Render runs with inline styling.
    ///
    /// Heading runs drop their own bold flag; the heading construct already
    /// carries the weight.
    pub fn render_runs(&self, runs: &[Run], options: &RenderOptions, heading: bool) -> String {
        let mut out = String::new();
        for run in runs {
            let spans = if options.parse_inline {
                tokenize(&run.text)
            } else {
                vec![InlineSpan::plain(run.text.clone())]
            };
            for span in spans.iter().filter(|s| !s.text.is_empty()) {
                let styled = self.render_span(span, run, options, heading);
                if run.underline {
                    out.push_str(&wrap_trimmed(&styled, |t| self.target.underline(t)));
                } else {
                    out.push_str(&styled);
                }
            }
        }
        out
    }

    fn render_span(
        &self,
        span: &InlineSpan,
        run: &Run,
        options: &RenderOptions,
        heading: bool,
    ) -> String {
        match span.kind {
            FormatKind::Code => return self.target.code(&span.text),
            FormatKind::Strikethrough => {
                let escaped = self.escape(&span.text, options);
                return wrap_trimmed(&escaped, |t| self.target.strike(t));
            }
            _ => {}
        }

        let escaped = self.escape(&span.text, options);
        let bold = (run.bold && !heading) || span.kind.is_bold();
        let italic = run.italic || span.kind.is_italic();
        match (bold, italic) {
            (true, true) => wrap_trimmed(&escaped, |t| self.target.bold_italic(t)),
            (true, false) => wrap_trimmed(&escaped, |t| self.target.bold(t)),
            (false, true) => wrap_trimmed(&escaped, |t| self.target.italic(t)),
            (false, false) => escaped,
        }
    }

    fn escape(&self, text: &str, options: &RenderOptions) -> String {
        if options.escape_special_chars {
            escape_with(text, self.target.escapes())
        } else {
            text.to_string()
        }
    }
}

impl<T: MarkupTarget> Renderer for MarkupRenderer<T> {
    fn name(&self) -> &str {
        self.target.name()
    }

    fn extension(&self) -> &str {
        self.target.extension()
    }

    fn render_document(&self, doc: &Document, options: &RenderOptions) -> Result<String> {
        let sections: Vec<String> = doc
            .sections
            .iter()
            .map(|s| self.render_section(s, options))
            .collect();
        log::debug!(
            "Rendered {} section(s) as {}",
            sections.len(),
            self.target.name()
        );
        Ok(self.target.document(doc, &sections, options))
    }

    fn render_chunk(&self, chunk: &Section, options: &RenderOptions) -> Result<String> {
        let body = self.render_section(chunk, options);
        Ok(self.target.chunk(chunk, body, options))
    }

    fn render_index(
        &self,
        title: &str,
        files: &[ChunkFile],
        options: &RenderOptions,
    ) -> Result<String> {
        Ok(self.target.index(title, files, options))
    }

    fn index_file_name(&self) -> String {
        self.target.index_file_name()
    }
}

/// Pad a row to `columns` cells; excess cells fold into the last column.
fn fit_row(mut cells: Vec<String>, columns: usize) -> Vec<String> {
    if cells.len() > columns {
        let excess = cells.split_off(columns);
        if let Some(last) = cells.last_mut() {
            for extra in excess.into_iter().filter(|e| !e.is_empty()) {
                if !last.is_empty() {
                    last.push(' ');
                }
                last.push_str(&extra);
            }
        }
    }
    cells.resize(columns, String::new());
    cells
}

/// Limit each item to one level deeper than the item before it.
///
/// Nested environments must open with an item, so an indent that skips
/// levels is pulled back to the next level down.
fn clamp_indents(items: &mut [RenderedItem]) {
    let mut max = 0u8;
    for item in items.iter_mut() {
        item.indent = item.indent.min(max);
        max = item.indent.saturating_add(1);
    }
}

/// Apply `wrap` to the text between leading and trailing whitespace.
fn wrap_trimmed(text: &str, wrap: impl Fn(&str) -> String) -> String {
    let core = text.trim();
    if core.is_empty() {
        return text.to_string();
    }
    let start = text.len() - text.trim_start().len();
    let end = start + core.len();
    format!("{}{}{}", &text[..start], wrap(core), &text[end..])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(indents: &[u8]) -> Vec<RenderedItem> {
        indents
            .iter()
            .map(|&indent| RenderedItem {
                indent,
                text: String::new(),
            })
            .collect()
    }

    #[test]
    fn test_clamp_indents() {
        let mut list = items(&[0, 2, 0, 3, 4, 1]);
        clamp_indents(&mut list);
        let indents: Vec<u8> = list.iter().map(|i| i.indent).collect();
        assert_eq!(indents, vec![0, 1, 0, 1, 2, 1]);

        let mut list = items(&[2, 2]);
        clamp_indents(&mut list);
        assert!(list.iter().all(|i| i.indent <= 1));
        assert_eq!(list[0].indent, 0);
    }

    #[test]
    fn test_fit_row() {
        assert_eq!(
            fit_row(vec!["a".into()], 3),
            vec!["a".to_string(), String::new(), String::new()]
        );
        assert_eq!(
            fit_row(vec!["a".into(), "b".into(), "c".into()], 2),
            vec!["a".to_string(), "b c".to_string()]
        );
    }

    #[test]
    fn test_wrap_trimmed_keeps_outer_space() {
        assert_eq!(wrap_trimmed(" bold ", |t| format!("**{}**", t)), " **bold** ");
        assert_eq!(wrap_trimmed("   ", |t| format!("**{}**", t)), "   ");
    }

    #[test]
    fn test_chunk_file_stem() {
        assert_eq!(ChunkFile::new("chunk_001_Intro.tex", "Intro").stem(), "chunk_001_Intro");
        assert_eq!(ChunkFile::new("README", "x").stem(), "README");
    }
}
