//! Structural extraction module.
//!
//! Span sources come from external adapters as JSON span dumps, or from the
//! built-in Markdown reader. The [`StructureParser`] classifies their span
//! groups with an ordered rule table and builds a [`Document`](crate::model::Document).

mod extractor;
mod markdown;
mod normalize;
mod options;
pub mod rules;
mod spans;

pub use extractor::{Extraction, StructureParser};
pub use markdown::parse_markdown;
pub(crate) use markdown::{is_separator_row, line_content, split_table_row};
pub use normalize::TextNormalizer;
pub use options::{ExtractOptions, StyleDefaults};
pub use rules::{MetricThresholds, RuleAction};
pub use spans::{SourceItem, SpanGroup, SpanSource, StyledSpan};
