//! Rendering module for converting document trees to output formats.
//!
//! Markup targets (Markdown, LaTeX, HTML, plain text) share one tree walker,
//! [`MarkupRenderer`]; JSON is serialized directly with serde.

mod escape;
mod html;
mod json;
mod latex;
mod markdown;
mod markup;
mod options;
mod registry;
mod result;
mod text;

pub use escape::{
    escape_with, make_label, EscapeTable, HTML_ESCAPES, LATEX_ESCAPES, MARKDOWN_ESCAPES,
    MAX_LABEL_LEN, NO_ESCAPES,
};
pub use html::{to_html, Html, HtmlRenderer};
pub use json::{to_json, JsonRenderer};
pub use latex::{to_latex, Latex, LatexRenderer, MAIN_FILE_NAME};
pub use markdown::{to_markdown, Markdown, MarkdownRenderer};
pub use markup::{ChunkFile, MarkupRenderer, MarkupTarget, RenderedItem, RenderedTable, Renderer};
pub use options::{JsonFormat, RenderOptions};
pub use registry::{RendererRegistry, TargetFormat};
pub use result::{ExtractionStats, RenderResult};
pub use text::{to_text, Text, TextRenderer};
