//! Rendering options and configuration.

use serde::{Deserialize, Serialize};

/// Options for rendering documents and chunks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Tokenize inline emphasis markers inside run text
    pub parse_inline: bool,

    /// Escape target-specific special characters
    pub escape_special_chars: bool,

    /// Date printed in document preambles; today when unset
    pub date: Option<String>,

    /// Prefix for image paths in output (e.g., "./images/")
    pub image_path_prefix: String,

    /// Character to use for unordered list markers
    pub list_marker: char,

    /// JSON output layout
    pub json_format: JsonFormat,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable inline marker tokenization.
    pub fn with_inline_parsing(mut self, parse: bool) -> Self {
        self.parse_inline = parse;
        self
    }

    /// Enable or disable escaping.
    pub fn with_escaping(mut self, escape: bool) -> Self {
        self.escape_special_chars = escape;
        self
    }

    /// Set a fixed preamble date.
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Set the image path prefix.
    pub fn with_image_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.image_path_prefix = prefix.into();
        self
    }

    /// Set the list marker character.
    pub fn with_list_marker(mut self, marker: char) -> Self {
        self.list_marker = marker;
        self
    }

    /// Set the JSON layout.
    pub fn with_json_format(mut self, format: JsonFormat) -> Self {
        self.json_format = format;
        self
    }

    /// The preamble date: the configured one, or today as `dd/mm/yyyy`.
    pub fn date_or_today(&self) -> String {
        self.date
            .clone()
            .unwrap_or_else(|| chrono::Local::now().format("%d/%m/%Y").to_string())
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            parse_inline: true,
            escape_special_chars: true,
            date: None,
            image_path_prefix: String::new(),
            list_marker: '-',
            json_format: JsonFormat::Pretty,
        }
    }
}

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}
