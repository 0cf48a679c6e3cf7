//! Document model types.
//!
//! This module defines the intermediate representation (IR) that bridges
//! structural extraction and rendering. A [`Document`] owns its
//! [`Section`]s, a section owns its [`Block`]s, and blocks own their runs,
//! list items and rows. The tree is append-only while it is being built and
//! read-only afterwards.

mod block;
mod document;
mod run;
mod table;

pub use block::{
    Block, ImageInfo, ImageMetadata, ListItem, MAX_HEADING_LEVEL, MIN_BLOCK_HEADING_LEVEL,
};
pub use document::{Document, Section, DEFAULT_SECTION_TITLE};
pub use run::{runs_plain_text, Alignment, Run};
pub use table::{column_count, TableCell, TableRow};
