//! Table types.

use super::{runs_plain_text, Run};
use serde::{Deserialize, Serialize};

/// A table row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    /// Cells in the row
    pub cells: Vec<TableCell>,

    /// Whether this is a header row
    #[serde(default)]
    pub is_header: bool,
}

impl TableRow {
    /// Create a new row with cells.
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self {
            cells,
            is_header: false,
        }
    }

    /// Create a header row.
    pub fn header(cells: Vec<TableCell>) -> Self {
        Self {
            cells,
            is_header: true,
        }
    }

    /// Create a row from text values.
    pub fn from_strings<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Self::new(values.into_iter().map(TableCell::text).collect())
    }

    /// Cell texts joined with `" | "`.
    ///
    /// This is the line a row contributes to a document's plain text.
    pub fn plain_text(&self) -> String {
        self.cells
            .iter()
            .map(|c| c.plain_text())
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

/// A table cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableCell {
    /// Cell content
    pub content: Vec<Run>,

    /// Number of rows this cell spans
    #[serde(default = "one")]
    pub row_span: u32,

    /// Number of columns this cell spans
    #[serde(default = "one")]
    pub col_span: u32,
}

fn one() -> u32 {
    1
}

impl TableCell {
    /// Create a new cell with text content. Empty text yields an empty cell.
    pub fn text(text: impl Into<String>) -> Self {
        let text = text.into();
        let content = if text.is_empty() {
            Vec::new()
        } else {
            vec![Run::new(text)]
        };
        Self::with_content(content)
    }

    /// Create an empty cell.
    pub fn empty() -> Self {
        Self::with_content(Vec::new())
    }

    /// Create a cell from runs.
    pub fn with_content(content: Vec<Run>) -> Self {
        Self {
            content,
            row_span: 1,
            col_span: 1,
        }
    }

    /// Set colspan and return self.
    pub fn col_span(mut self, span: u32) -> Self {
        self.col_span = span.max(1);
        self
    }

    /// Set rowspan and return self.
    pub fn row_span(mut self, span: u32) -> Self {
        self.row_span = span.max(1);
        self
    }

    /// Get plain text content.
    pub fn plain_text(&self) -> String {
        runs_plain_text(&self.content)
    }

    /// Check if the cell is empty.
    pub fn is_empty(&self) -> bool {
        self.plain_text().trim().is_empty()
    }

    /// Check if this cell spans multiple rows or columns.
    pub fn is_merged(&self) -> bool {
        self.row_span > 1 || self.col_span > 1
    }
}

impl Default for TableCell {
    fn default() -> Self {
        Self::empty()
    }
}

/// Number of columns a grid of rows renders with: the first row's cell count.
pub fn column_count(rows: &[TableRow]) -> usize {
    rows.first().map(|r| r.cells.len()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_plain_text() {
        let row = TableRow::from_strings(["Name", "Age"]);
        assert_eq!(row.plain_text(), "Name | Age");
        assert!(!row.is_header);
    }

    #[test]
    fn test_cell_text() {
        let cell = TableCell::text("Hello");
        assert_eq!(cell.plain_text(), "Hello");
        assert!(!cell.is_empty());
        assert!(!cell.is_merged());

        assert!(TableCell::text("").content.is_empty());
        assert!(TableCell::text("x").col_span(2).is_merged());
    }

    #[test]
    fn test_column_count_uses_first_row() {
        let rows = vec![
            TableRow::header(vec![TableCell::text("a"), TableCell::text("b")]),
            TableRow::from_strings(["1", "2", "3"]),
        ];
        assert_eq!(column_count(&rows), 2);
        assert_eq!(column_count(&[]), 0);
    }
}
