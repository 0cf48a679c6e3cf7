//! Styled span input contract.
//!
//! External readers (PDF text extractors, Word paragraph walkers) produce a
//! [`SpanSource`]: document metadata plus an ordered list of
//! [`SourceItem`]s. Sources serialize to JSON so adapters written in any
//! language can hand a span dump to the extractor.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// One styled run of input text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyledSpan {
    /// The text content
    pub text: String,

    /// Font size in points
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,

    /// Bold weight
    #[serde(default)]
    pub bold: bool,

    /// Italic style
    #[serde(default)]
    pub italic: bool,

    /// Underlined
    #[serde(default)]
    pub underline: bool,

    /// Font name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_name: Option<String>,

    /// Named paragraph style, e.g. `"Heading 1"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_name: Option<String>,
}

impl StyledSpan {
    /// Create a plain span.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Set font size and return self.
    pub fn size(mut self, points: f32) -> Self {
        self.font_size = Some(points);
        self
    }

    /// Set bold and return self.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Set italic and return self.
    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Set the paragraph style name and return self.
    pub fn style(mut self, name: impl Into<String>) -> Self {
        self.style_name = Some(name.into());
        self
    }
}

/// The spans of one line or paragraph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpanGroup {
    pub spans: Vec<StyledSpan>,
}

impl SpanGroup {
    /// Create a group from spans.
    pub fn new(spans: Vec<StyledSpan>) -> Self {
        Self { spans }
    }

    /// A one-span paragraph with a named style.
    pub fn styled(style: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(vec![StyledSpan::new(text).style(style)])
    }

    /// Concatenated span text, trimmed.
    pub fn text(&self) -> String {
        let joined: String = self.spans.iter().map(|s| s.text.as_str()).collect();
        joined.trim().to_string()
    }

    /// Check if the group has no visible text.
    pub fn is_blank(&self) -> bool {
        self.spans.iter().all(|s| s.text.trim().is_empty())
    }

    /// Average font size over the spans that carry one.
    pub fn average_font_size(&self) -> Option<f32> {
        let sizes: Vec<f32> = self.spans.iter().filter_map(|s| s.font_size).collect();
        if sizes.is_empty() {
            None
        } else {
            Some(sizes.iter().sum::<f32>() / sizes.len() as f32)
        }
    }

    /// True when any span is bold.
    pub fn any_bold(&self) -> bool {
        self.spans.iter().any(|s| s.bold)
    }

    /// The first style name found on the group's spans.
    pub fn style_name(&self) -> Option<&str> {
        self.spans.iter().find_map(|s| s.style_name.as_deref())
    }
}

/// One item of a span source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SourceItem {
    /// A line or paragraph of styled text
    Group(SpanGroup),

    /// An embedded image
    Image {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        path: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        caption: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        bbox: Option<[f32; 4]>,
    },

    /// A table as rows of cell text
    Table { rows: Vec<Vec<String>> },

    /// Verbatim code
    Code {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        lang: Option<String>,
        text: String,
    },

    /// Page boundary
    PageBreak,
}

/// Document metadata plus ordered source items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpanSource {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub author: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_path: Option<String>,

    /// Source kind, e.g. `"pdf"` or `"docx"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_type: Option<String>,

    #[serde(default)]
    pub items: Vec<SourceItem>,
}

impl SpanSource {
    /// Create an empty source.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Set the source type and return self.
    pub fn with_source_type(mut self, source_type: impl Into<String>) -> Self {
        self.source_type = Some(source_type.into());
        self
    }

    /// Set the author and return self.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Append an item.
    pub fn push(&mut self, item: SourceItem) {
        self.items.push(item);
    }

    /// Append a span group.
    pub fn push_group(&mut self, spans: Vec<StyledSpan>) {
        self.items.push(SourceItem::Group(SpanGroup::new(spans)));
    }

    /// Iterate over the span groups.
    pub fn groups(&self) -> impl Iterator<Item = &SpanGroup> {
        self.items.iter().filter_map(|item| match item {
            SourceItem::Group(g) => Some(g),
            _ => None,
        })
    }

    /// Check if any span carries a paragraph style name.
    pub fn has_style_names(&self) -> bool {
        self.groups()
            .flat_map(|g| g.spans.iter())
            .any(|s| s.style_name.is_some())
    }

    /// Parse a JSON span dump.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to a JSON span dump.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_metrics() {
        let group = SpanGroup::new(vec![
            StyledSpan::new("Chapter ").size(18.0).bold(),
            StyledSpan::new("1").size(16.0),
            StyledSpan::new(" "),
        ]);
        assert_eq!(group.text(), "Chapter 1");
        assert_eq!(group.average_font_size(), Some(17.0));
        assert!(group.any_bold());
        assert!(!group.is_blank());
    }

    #[test]
    fn test_group_without_sizes() {
        let group = SpanGroup::styled("Normal", "  ");
        assert_eq!(group.average_font_size(), None);
        assert!(group.is_blank());
        assert_eq!(group.style_name(), Some("Normal"));
    }

    #[test]
    fn test_json_span_dump() {
        let json = r#"{
            "title": "Report",
            "source_type": "pdf",
            "items": [
                {"type": "group", "spans": [{"text": "Intro", "font_size": 18, "bold": true}]},
                {"type": "page_break"},
                {"type": "image", "bbox": [0, 0, 10, 10]},
                {"type": "table", "rows": [["a", "b"], ["1", "2"]]}
            ]
        }"#;
        let source = SpanSource::from_json(json).unwrap();
        assert_eq!(source.title, "Report");
        assert_eq!(source.author, "");
        assert_eq!(source.items.len(), 4);
        assert_eq!(source.groups().count(), 1);
        assert!(!source.has_style_names());
        assert!(matches!(source.items[1], SourceItem::PageBreak));
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(SpanSource::from_json("{ not json").is_err());
    }
}
