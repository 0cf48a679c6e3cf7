//! JSON rendering of the document tree.

use serde::Serialize;

use super::markup::{ChunkFile, Renderer};
use super::options::{JsonFormat, RenderOptions};
use crate::error::{Error, Result};
use crate::model::{Document, Section};

/// Serializes documents and chunks with serde.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

/// Convert a document to JSON.
pub fn to_json(doc: &Document, format: JsonFormat) -> Result<String> {
    serialize(doc, format)
}

fn serialize<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[derive(Serialize)]
struct Index<'a> {
    title: &'a str,
    chunks: &'a [ChunkFile],
}

impl Renderer for JsonRenderer {
    fn name(&self) -> &str {
        "json"
    }

    fn extension(&self) -> &str {
        "json"
    }

    fn render_document(&self, doc: &Document, options: &RenderOptions) -> Result<String> {
        serialize(doc, options.json_format)
    }

    fn render_chunk(&self, chunk: &Section, options: &RenderOptions) -> Result<String> {
        serialize(chunk, options.json_format)
    }

    fn render_index(
        &self,
        title: &str,
        files: &[ChunkFile],
        options: &RenderOptions,
    ) -> Result<String> {
        serialize(
            &Index {
                title,
                chunks: files,
            },
            options.json_format,
        )
    }
}
