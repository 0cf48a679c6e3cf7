//! Pipeline configuration.

use serde::{Deserialize, Serialize};

use crate::detect::HeuristicKind;
use crate::error::Result;
use crate::parser::{ExtractOptions, StyleDefaults};
use crate::render::{RenderOptions, TargetFormat};
use crate::split::{EmptyChunkPolicy, Splitter, DEFAULT_MAX_CHARS};

/// Configuration for a [`Pipeline`](super::Pipeline).
///
/// Every field has a default, so a partial JSON object is a valid config:
///
/// ```
/// use docchunk::convert::PipelineConfig;
/// use docchunk::render::TargetFormat;
///
/// let config = PipelineConfig::from_json(r#"{"split_level": 2, "target": "tex"}"#).unwrap();
/// assert_eq!(config.split_level, 2);
/// assert_eq!(config.target, TargetFormat::Latex);
/// assert_eq!(config.max_chars, 6000);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Heading depth that opens a new chunk; clamped to at least 1
    pub split_level: u8,

    /// Advisory chunk size in characters
    pub max_chars: usize,

    /// Output format
    pub target: TargetFormat,

    /// Default run fonts
    pub style: StyleDefaults,

    /// What to do with chunks that close without content
    pub empty_chunks: EmptyChunkPolicy,

    /// Forced heuristic table; detected per source when unset
    pub heuristic: Option<HeuristicKind>,

    /// Keep page boundaries as page-break blocks
    pub keep_page_breaks: bool,

    /// Forced text normalization; metric sources only when unset
    pub normalize_text: Option<bool>,

    /// Process batches with one worker per file
    pub parallel: bool,

    /// Rendering options
    pub render: RenderOptions,
}

impl PipelineConfig {
    /// Create a new config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut config: Self = serde_json::from_str(json)?;
        config.split_level = config.split_level.max(1);
        Ok(config)
    }

    /// Set the split level.
    pub fn with_split_level(mut self, level: u8) -> Self {
        self.split_level = level.max(1);
        self
    }

    /// Set the advisory chunk size.
    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    /// Set the output format.
    pub fn with_target(mut self, target: TargetFormat) -> Self {
        self.target = target;
        self
    }

    /// Set default run fonts.
    pub fn with_style(mut self, style: StyleDefaults) -> Self {
        self.style = style;
        self
    }

    /// Set the empty chunk policy.
    pub fn with_empty_chunks(mut self, policy: EmptyChunkPolicy) -> Self {
        self.empty_chunks = policy;
        self
    }

    /// Force a heuristic table.
    pub fn with_heuristic(mut self, kind: HeuristicKind) -> Self {
        self.heuristic = Some(kind);
        self
    }

    /// Keep page breaks as blocks.
    pub fn with_page_breaks(mut self, keep: bool) -> Self {
        self.keep_page_breaks = keep;
        self
    }

    /// Force normalization on or off.
    pub fn with_normalization(mut self, enabled: bool) -> Self {
        self.normalize_text = Some(enabled);
        self
    }

    /// Enable parallel batch processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set rendering options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render = options;
        self
    }

    /// Extraction options derived from this config.
    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            heuristic: self.heuristic,
            keep_page_breaks: self.keep_page_breaks,
            normalize_text: self.normalize_text,
            style: self.style.clone(),
            ..ExtractOptions::default()
        }
    }

    /// Splitter derived from this config.
    pub fn splitter(&self) -> Splitter {
        Splitter::new(self.split_level)
            .with_max_chars(self.max_chars)
            .with_empty_chunks(self.empty_chunks)
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            split_level: 1,
            max_chars: DEFAULT_MAX_CHARS,
            target: TargetFormat::default(),
            style: StyleDefaults::default(),
            empty_chunks: EmptyChunkPolicy::default(),
            heuristic: None,
            keep_page_breaks: false,
            normalize_text: None,
            parallel: false,
            render: RenderOptions::default(),
        }
    }
}
