//! Error and warning types for docchunk.
//!
//! Only a missing input and an unsupported render target are hard errors.
//! Everything the pipeline can degrade around is reported as a [`Warning`]
//! next to a still-usable result.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for docchunk operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Hard errors, surfaced per document.
#[derive(Error, Debug)]
pub enum Error {
    /// The input file does not exist.
    #[error("Input not found: {}", .0.display())]
    NotFound(PathBuf),

    /// No renderer is registered for the requested target.
    #[error("Unsupported target format: {0}")]
    UnsupportedFormat(String),

    /// I/O error when reading sources or writing to a sink.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error during rendering.
    #[error("Rendering error: {0}")]
    Render(String),

    /// Error serializing the document tree.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Non-fatal conditions attached to an otherwise successful result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// The source was unreadable or corrupt; a best-effort document was built.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Extraction produced zero sections.
    #[error("Document has no sections")]
    EmptyDocument,

    /// The verifier found source lines missing from the chunk set.
    #[error("Split may be incomplete: {} line(s) missing", .missing.len())]
    IncompleteSplit {
        /// Up to the verifier's cap of missing lines
        missing: Vec<String>,
    },
}
