//! Extraction options and configuration.

use super::normalize::TextNormalizer;
use super::rules::MetricThresholds;
use crate::detect::HeuristicKind;
use serde::{Deserialize, Serialize};

/// Default run attributes applied when a span carries no explicit font.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleDefaults {
    /// Font name
    pub font_name: String,

    /// Font size in points
    pub font_size: f32,
}

impl Default for StyleDefaults {
    fn default() -> Self {
        Self {
            font_name: "Times New Roman".to_string(),
            font_size: 14.0,
        }
    }
}

/// Options for structural extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractOptions {
    /// Forced heuristic table; `None` detects from the source
    pub heuristic: Option<HeuristicKind>,

    /// Font-size thresholds for the metric table
    pub thresholds: MetricThresholds,

    /// Whether page boundaries become page-break blocks
    pub keep_page_breaks: bool,

    /// Forced text normalization; `None` normalizes metric sources only
    pub normalize_text: Option<bool>,

    /// Defaults for runs without font information
    pub style: StyleDefaults,
}

impl ExtractOptions {
    /// Create new extract options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Force a heuristic table.
    pub fn with_heuristic(mut self, kind: HeuristicKind) -> Self {
        self.heuristic = Some(kind);
        self
    }

    /// Set the section and heading size thresholds.
    pub fn with_thresholds(mut self, section_min_size: f32, heading_min_size: f32) -> Self {
        self.thresholds = MetricThresholds {
            section_min_size,
            heading_min_size,
        };
        self
    }

    /// Keep page boundaries as page-break blocks.
    pub fn with_page_breaks(mut self, keep: bool) -> Self {
        self.keep_page_breaks = keep;
        self
    }

    /// Force text normalization on or off.
    pub fn with_normalization(mut self, enabled: bool) -> Self {
        self.normalize_text = Some(enabled);
        self
    }

    /// Set default run styling.
    pub fn with_style(mut self, style: StyleDefaults) -> Self {
        self.style = style;
        self
    }

    /// The normalizer to use for a source classified with `kind`.
    pub fn normalizer_for(&self, kind: HeuristicKind) -> TextNormalizer {
        let enabled = self
            .normalize_text
            .unwrap_or(kind == HeuristicKind::Metric);
        if enabled {
            TextNormalizer::new()
        } else {
            TextNormalizer::disabled()
        }
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            heuristic: None,
            thresholds: MetricThresholds::default(),
            keep_page_breaks: false,
            normalize_text: None,
            style: StyleDefaults::default(),
        }
    }
}
