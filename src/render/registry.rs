//! Target formats and the renderer registry.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::html::Html;
use super::json::JsonRenderer;
use super::latex::Latex;
use super::markdown::Markdown;
use super::markup::{MarkupRenderer, Renderer};
use super::text::Text;
use crate::error::{Error, Result};

/// Built-in output formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetFormat {
    #[default]
    #[serde(alias = "md")]
    Markdown,
    #[serde(alias = "tex")]
    Latex,
    #[serde(alias = "htm")]
    Html,
    #[serde(alias = "txt")]
    Text,
    Json,
}

impl TargetFormat {
    /// All built-in formats.
    pub const ALL: [TargetFormat; 5] = [
        TargetFormat::Markdown,
        TargetFormat::Latex,
        TargetFormat::Html,
        TargetFormat::Text,
        TargetFormat::Json,
    ];

    /// Registry name of the format's renderer.
    pub fn name(self) -> &'static str {
        match self {
            TargetFormat::Markdown => "md",
            TargetFormat::Latex => "tex",
            TargetFormat::Html => "html",
            TargetFormat::Text => "txt",
            TargetFormat::Json => "json",
        }
    }

    /// File extension without the leading dot.
    pub fn extension(self) -> &'static str {
        self.name()
    }
}

impl fmt::Display for TargetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TargetFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "md" | "markdown" => Ok(TargetFormat::Markdown),
            "tex" | "latex" => Ok(TargetFormat::Latex),
            "html" | "htm" => Ok(TargetFormat::Html),
            "txt" | "text" => Ok(TargetFormat::Text),
            "json" => Ok(TargetFormat::Json),
            other => Err(Error::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Registry of renderers keyed by name and extension.
pub struct RendererRegistry {
    renderers: HashMap<String, Arc<dyn Renderer>>,
}

impl RendererRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            renderers: HashMap::new(),
        }
    }

    /// Create a registry with every built-in target.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(MarkupRenderer::new(Markdown)));
        registry.register(Arc::new(MarkupRenderer::new(Latex)));
        registry.register(Arc::new(MarkupRenderer::new(Html)));
        registry.register(Arc::new(MarkupRenderer::new(Text)));
        registry.register(Arc::new(JsonRenderer));
        registry
    }

    /// Register a renderer under its name and extension.
    ///
    /// A later registration replaces an earlier one with the same key.
    pub fn register(&mut self, renderer: Arc<dyn Renderer>) {
        self.renderers
            .insert(renderer.extension().to_lowercase(), renderer.clone());
        self.renderers
            .insert(renderer.name().to_lowercase(), renderer);
    }

    /// Look up a renderer by name, extension or format alias.
    pub fn get(&self, name: &str) -> Result<Arc<dyn Renderer>> {
        let key = name.trim().trim_start_matches('.').to_lowercase();
        if let Some(renderer) = self.renderers.get(&key) {
            return Ok(renderer.clone());
        }

        key.parse::<TargetFormat>()
            .ok()
            .and_then(|format| self.renderers.get(format.name()).cloned())
            .ok_or(Error::UnsupportedFormat(key))
    }

    /// Look up the renderer for a built-in format.
    pub fn get_format(&self, format: TargetFormat) -> Result<Arc<dyn Renderer>> {
        self.get(format.name())
    }

    /// Check if a name is registered.
    pub fn supports(&self, name: &str) -> bool {
        self.get(name).is_ok()
    }

    /// All registered keys, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.renderers.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }
}

impl Default for RendererRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl fmt::Debug for RendererRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RendererRegistry")
            .field("renderers", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_format_from_str() {
        assert_eq!("markdown".parse::<TargetFormat>().unwrap(), TargetFormat::Markdown);
        assert_eq!("MD".parse::<TargetFormat>().unwrap(), TargetFormat::Markdown);
        assert_eq!("latex".parse::<TargetFormat>().unwrap(), TargetFormat::Latex);
        assert_eq!("htm".parse::<TargetFormat>().unwrap(), TargetFormat::Html);
        assert_eq!("text".parse::<TargetFormat>().unwrap(), TargetFormat::Text);
        assert_eq!("json".parse::<TargetFormat>().unwrap(), TargetFormat::Json);
        assert!(matches!(
            "docx".parse::<TargetFormat>(),
            Err(Error::UnsupportedFormat(f)) if f == "docx"
        ));
    }

    #[test]
    fn test_target_format_serde_aliases() {
        let format: TargetFormat = serde_json::from_str("\"tex\"").unwrap();
        assert_eq!(format, TargetFormat::Latex);
        assert_eq!(serde_json::to_string(&TargetFormat::Html).unwrap(), "\"html\"");
    }

    #[test]
    fn test_registry_with_defaults() {
        let registry = RendererRegistry::with_defaults();
        for format in TargetFormat::ALL {
            let renderer = registry.get_format(format).unwrap();
            assert_eq!(renderer.extension(), format.extension());
        }
        assert!(registry.supports("latex"));
        assert!(registry.supports(".HTML"));
    }

    #[test]
    fn test_registry_unknown_target() {
        let registry = RendererRegistry::with_defaults();
        match registry.get("rtf") {
            Err(Error::UnsupportedFormat(name)) => assert_eq!(name, "rtf"),
            other => panic!("expected UnsupportedFormat, got {:?}", other.map(|r| r.name().to_string())),
        }
    }

    #[test]
    fn test_empty_registry_rejects_builtin() {
        let registry = RendererRegistry::new();
        assert!(matches!(registry.get("md"), Err(Error::UnsupportedFormat(_))));
    }
}
