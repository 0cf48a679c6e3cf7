//! Structural extraction: span sources to document trees.

use std::path::Path;

use crate::detect::{detect_heuristic, detect_input_format, HeuristicKind, InputFormat};
use crate::error::{Error, Result, Warning};
use crate::model::{
    Block, Document, ImageInfo, ImageMetadata, ListItem, Run, Section, TableCell, TableRow,
};

use super::markdown::parse_markdown;
use super::normalize::TextNormalizer;
use super::options::ExtractOptions;
use super::rules::{classify, GroupFeatures, RuleAction, METRIC_RULES, STYLE_RULES};
use super::spans::{SourceItem, SpanGroup, SpanSource, StyledSpan};

/// A best-effort document plus the warnings raised while building it.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub document: Document,
    pub warnings: Vec<Warning>,

    /// Markdown input text, normalized like the document's runs
    pub source_text: Option<String>,
}

/// Classifies span sources into documents.
#[derive(Debug, Clone, Default)]
pub struct StructureParser {
    options: ExtractOptions,
}

impl StructureParser {
    /// Create a parser with the given options.
    pub fn new(options: ExtractOptions) -> Self {
        Self { options }
    }

    /// Get the parser's options.
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Read and classify a file.
    ///
    /// A missing file is an error. Unreadable content degrades to an empty
    /// document titled by the file stem, with a
    /// [`Warning::MalformedInput`].
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<Extraction> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::NotFound(path.to_path_buf()));
        }
        let data = std::fs::read(path)?;
        Ok(self.parse_bytes(&data, detect_input_format(path), path))
    }

    /// Classify file content already read into memory.
    pub fn parse_bytes(&self, data: &[u8], format: InputFormat, path: &Path) -> Extraction {
        let mut warnings = Vec::new();
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        let text = match std::str::from_utf8(data) {
            Ok(text) => text.to_string(),
            Err(e) => {
                log::warn!("{}: invalid UTF-8, decoding lossily: {}", path.display(), e);
                warnings.push(Warning::MalformedInput(format!(
                    "{}: invalid UTF-8 at byte {}",
                    path.display(),
                    e.valid_up_to()
                )));
                String::from_utf8_lossy(data).to_string()
            }
        };

        let source = match format {
            InputFormat::Markdown => Some(parse_markdown(&text)),
            InputFormat::SpanDump => match SpanSource::from_json(&text) {
                Ok(source) => Some(source),
                Err(e) => {
                    log::warn!("{}: unreadable span dump: {}", path.display(), e);
                    warnings.push(Warning::MalformedInput(format!("{}: {}", path.display(), e)));
                    None
                }
            },
        };

        let mut extraction = match source {
            Some(mut source) => {
                if source.title.trim().is_empty() {
                    source.title = stem;
                }
                if source.source_path.is_none() {
                    source.source_path = Some(path.display().to_string());
                }
                let mut extraction = self.parse(&source);
                if format == InputFormat::Markdown {
                    extraction.source_text = Some(self.normalize_source(&source, &text));
                }
                extraction
            }
            None => {
                let mut document = Document::new(stem, "");
                document.source_path = Some(path.display().to_string());
                Extraction {
                    document,
                    warnings: vec![Warning::EmptyDocument],
                    source_text: None,
                }
            }
        };

        warnings.append(&mut extraction.warnings);
        extraction.warnings = warnings;
        extraction
    }

    /// Classify Markdown text, keeping the text for verification.
    pub fn parse_markdown_text(&self, text: &str) -> Extraction {
        let source = parse_markdown(text);
        let mut extraction = self.parse(&source);
        extraction.source_text = Some(self.normalize_source(&source, text));
        extraction
    }

    fn heuristic_for(&self, source: &SpanSource) -> HeuristicKind {
        self.options
            .heuristic
            .unwrap_or_else(|| detect_heuristic(source))
    }

    fn normalize_source(&self, source: &SpanSource, text: &str) -> String {
        self.options
            .normalizer_for(self.heuristic_for(source))
            .normalize(text)
    }

    /// Classify an in-memory span source.
    pub fn parse(&self, source: &SpanSource) -> Extraction {
        let kind = self.heuristic_for(source);
        let normalizer = self.options.normalizer_for(kind);
        log::debug!(
            "Extracting '{}' with {} heuristic ({} items)",
            source.title,
            kind,
            source.items.len()
        );

        let mut builder = TreeBuilder::new(source, &self.options, normalizer);
        for item in &source.items {
            match item {
                SourceItem::Group(group) => builder.group(group, kind),
                SourceItem::Image {
                    path,
                    caption,
                    bbox,
                } => builder.image(path.clone(), caption.clone(), *bbox),
                SourceItem::Table { rows } => builder.table(rows),
                SourceItem::Code { lang, text } => builder.code(lang.clone(), text),
                SourceItem::PageBreak => builder.page_break(),
            }
        }
        let document = builder.finish();

        log::debug!(
            "Extracted {} section(s), {} block(s)",
            document.section_count(),
            document.total_blocks()
        );

        let mut warnings = Vec::new();
        if document.is_empty() {
            log::warn!("'{}' produced no sections", document.title);
            warnings.push(Warning::EmptyDocument);
        }
        Extraction {
            document,
            warnings,
            source_text: None,
        }
    }
}

/// Append-only document construction state.
struct TreeBuilder<'a> {
    document: Document,
    current: Option<Section>,
    page: u32,
    options: &'a ExtractOptions,
    normalizer: TextNormalizer,
}

impl<'a> TreeBuilder<'a> {
    fn new(source: &SpanSource, options: &'a ExtractOptions, normalizer: TextNormalizer) -> Self {
        let mut document = Document::new(source.title.clone(), source.author.clone());
        document.source_path = source.source_path.clone();
        document.source_type = source.source_type.clone();
        Self {
            document,
            current: None,
            page: 0,
            options,
            normalizer,
        }
    }

    fn section(&mut self) -> &mut Section {
        self.current.get_or_insert_with(Section::placeholder)
    }

    fn open_section(&mut self, title: String) {
        if let Some(section) = self.current.take() {
            self.document.add_section(section);
        }
        self.current = Some(Section::new(title, 1));
    }

    fn group(&mut self, group: &SpanGroup, kind: HeuristicKind) {
        if group.is_blank() {
            return;
        }
        let rules = match kind {
            HeuristicKind::Metric => METRIC_RULES,
            HeuristicKind::StyleName => STYLE_RULES,
        };
        let features = GroupFeatures::of(group);
        let (rule, action) = classify(rules, &features, &self.options.thresholds);
        let text = self.normalizer.normalize(&group.text()).trim().to_string();
        log::debug!("'{}' -> {:?} ({})", preview(&text), action, rule);

        match action {
            RuleAction::NewSection => self.open_section(text),
            RuleAction::Heading(level) => {
                let run = self.heading_run(group, text);
                self.section().add_block(Block::heading_runs(vec![run], level));
            }
            RuleAction::ListItem { ordered, indent } => {
                let item = ListItem::new(self.runs(group), indent);
                self.list_item(item, ordered);
            }
            RuleAction::Quote => {
                let runs = self.runs(group);
                self.section().add_block(Block::Quote { runs });
            }
            RuleAction::Paragraph => {
                let runs = self.runs(group);
                self.section().add_block(Block::paragraph_runs(runs));
            }
        }
    }

    fn list_item(&mut self, item: ListItem, ordered: bool) {
        let section = self.section();
        if let Some(Block::List {
            ordered: last_ordered,
            items,
        }) = section.blocks.last_mut()
        {
            if *last_ordered == ordered {
                items.push(item);
                return;
            }
        }
        section.add_block(Block::List {
            ordered,
            items: vec![item],
        });
    }

    fn image(&mut self, path: Option<String>, caption: Option<String>, bbox: Option<[f32; 4]>) {
        let info = ImageInfo {
            path,
            caption,
            metadata: ImageMetadata {
                page: Some(self.page),
                bbox,
            },
        };
        self.section().add_block(Block::Image(info));
    }

    fn table(&mut self, rows: &[Vec<String>]) {
        if rows.is_empty() {
            return;
        }
        let rows: Vec<TableRow> = rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let cells = row
                    .iter()
                    .map(|cell| TableCell::text(self.normalizer.normalize(cell.trim())))
                    .collect();
                if i == 0 {
                    TableRow::header(cells)
                } else {
                    TableRow::new(cells)
                }
            })
            .collect();
        log::debug!("Table with {} row(s)", rows.len());
        self.section().add_block(Block::Table { rows });
    }

    fn code(&mut self, lang: Option<String>, text: &str) {
        self.section().add_block(Block::code(lang, text));
    }

    fn page_break(&mut self) {
        self.page += 1;
        if self.options.keep_page_breaks {
            if let Some(section) = self.current.as_mut() {
                section.add_block(Block::PageBreak);
            }
        }
    }

    /// One run per non-empty span, font defaults filled in.
    fn runs(&self, group: &SpanGroup) -> Vec<Run> {
        group
            .spans
            .iter()
            .filter_map(|span| {
                let text = self.normalizer.normalize(&span.text);
                if text.is_empty() {
                    return None;
                }
                Some(self.run_from(span, text))
            })
            .collect()
    }

    fn run_from(&self, span: &StyledSpan, text: String) -> Run {
        let style = &self.options.style;
        Run {
            text,
            bold: span.bold,
            italic: span.italic,
            underline: span.underline,
            font_name: Some(
                span.font_name
                    .clone()
                    .unwrap_or_else(|| style.font_name.clone()),
            ),
            font_size: Some(span.font_size.unwrap_or(style.font_size)),
        }
    }

    fn heading_run(&self, group: &SpanGroup, text: String) -> Run {
        let style = &self.options.style;
        Run {
            text,
            bold: true,
            italic: false,
            underline: false,
            font_name: Some(
                group
                    .spans
                    .iter()
                    .find_map(|s| s.font_name.clone())
                    .unwrap_or_else(|| style.font_name.clone()),
            ),
            font_size: Some(group.average_font_size().unwrap_or(style.font_size)),
        }
    }

    fn finish(mut self) -> Document {
        if let Some(section) = self.current.take() {
            self.document.add_section(section);
        }
        self.document
    }
}

fn preview(text: &str) -> String {
    text.chars().take(40).collect()
}
