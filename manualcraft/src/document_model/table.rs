//! Table component data and span-aware layout
//!
//! Cells carry their own `rowspan`/`colspan`. Layout walks the rows in order
//! and keeps an explicit covered grid so that cells hidden under a span from
//! an earlier row or column are skipped. Spans that reach past the table edge
//! are clamped instead of failing.

use super::types::{null_as_default, span_or_one};
use serde::{Deserialize, Serialize};
use std::io::Read;

fn one() -> u32 {
    1
}

/// A single table cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCell {
    #[serde(default)]
    pub text: String,
    #[serde(default = "one", deserialize_with = "span_or_one")]
    pub rowspan: u32,
    #[serde(default = "one", deserialize_with = "span_or_one")]
    pub colspan: u32,
}

impl TableCell {
    /// A cell spanning one row and one column
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            rowspan: 1,
            colspan: 1,
        }
    }
}

/// Address of a cell within a table
///
/// Stored as `{row, col}` where row `-1` is the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredCellRef", into = "StoredCellRef")]
pub enum CellRef {
    /// A cell of the header row
    Header { col: usize },
    /// A cell of the body, `row` counted from the first body row
    Body { row: usize, col: usize },
}

const HEADER_ROW: i64 = -1;

#[derive(Serialize, Deserialize)]
struct StoredCellRef {
    row: i64,
    col: usize,
}

impl TryFrom<StoredCellRef> for CellRef {
    type Error = String;

    fn try_from(stored: StoredCellRef) -> Result<Self, Self::Error> {
        match stored.row {
            HEADER_ROW => Ok(CellRef::Header { col: stored.col }),
            row => usize::try_from(row)
                .map(|row| CellRef::Body { row, col: stored.col })
                .map_err(|_| format!("invalid cell row {}", row)),
        }
    }
}

impl From<CellRef> for StoredCellRef {
    fn from(cell: CellRef) -> Self {
        match cell {
            CellRef::Header { col } => StoredCellRef {
                row: HEADER_ROW,
                col,
            },
            CellRef::Body { row, col } => StoredCellRef {
                row: i64::try_from(row).unwrap_or(i64::MAX),
                col,
            },
        }
    }
}

/// Which span of a cell to change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    Row,
    Column,
}

/// Properties of a table component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TableProps {
    pub headers: Vec<TableCell>,
    pub rows: Vec<Vec<TableCell>>,
    pub header_color: String,
    pub header_text_color: String,
    pub header_font_weight: String,
    pub alternate_row_color: String,
    #[serde(deserialize_with = "null_as_default")]
    pub cell_padding: f64,
    pub border_color: String,
    #[serde(deserialize_with = "null_as_default")]
    pub border_width: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub cell_font_size: f64,
    pub cell_text_color: String,
    /// Cell currently focused in the property panel
    pub selected_cell: Option<CellRef>,
}

impl Default for TableProps {
    fn default() -> Self {
        Self {
            headers: vec![TableCell::new("Parameter"), TableCell::new("Value")],
            rows: vec![
                vec![TableCell::new("Voltage"), TableCell::new("220V")],
                vec![TableCell::new("Power"), TableCell::new("1.5kW")],
            ],
            header_color: "#3b82f6".to_string(),
            header_text_color: "#ffffff".to_string(),
            header_font_weight: "bold".to_string(),
            alternate_row_color: "#f1f5f9".to_string(),
            cell_padding: 8.0,
            border_color: "#cbd5e1".to_string(),
            border_width: 1.0,
            cell_font_size: 14.0,
            cell_text_color: "#334155".to_string(),
            selected_cell: None,
        }
    }
}

impl TableProps {
    /// Build a table from CSV data, using the first record as the header row
    ///
    /// # Parameters
    /// * `reader` - Source of CSV text
    ///
    /// # Returns
    /// * `Ok(TableProps)` - Table with default styling and the CSV contents
    /// * `Err(csv::Error)` - Error reading or parsing the CSV data
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, csv::Error> {
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

        let headers = reader.headers()?.iter().map(TableCell::new).collect();

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            rows.push(record.iter().map(TableCell::new).collect());
        }

        Ok(Self {
            headers,
            rows,
            ..Self::default()
        })
    }

    /// Number of layout columns (header count or longest row, whichever is larger)
    pub fn column_count(&self) -> usize {
        self.rows
            .iter()
            .map(Vec::len)
            .max()
            .unwrap_or(0)
            .max(self.headers.len())
    }

    pub fn cell(&self, at: CellRef) -> Option<&TableCell> {
        match at {
            CellRef::Header { col } => self.headers.get(col),
            CellRef::Body { row, col } => self.rows.get(row).and_then(|r| r.get(col)),
        }
    }

    pub fn cell_mut(&mut self, at: CellRef) -> Option<&mut TableCell> {
        match at {
            CellRef::Header { col } => self.headers.get_mut(col),
            CellRef::Body { row, col } => self.rows.get_mut(row).and_then(|r| r.get_mut(col)),
        }
    }

    /// Replace the text of a cell; missing cells are ignored
    pub fn set_cell_text(&mut self, at: CellRef, text: impl Into<String>) -> bool {
        match self.cell_mut(at) {
            Some(cell) => {
                cell.text = text.into();
                true
            }
            None => false,
        }
    }

    /// Focus a cell, or clear the focus with `None`
    ///
    /// Selecting a cell that does not exist clears the selection.
    pub fn select_cell(&mut self, at: Option<CellRef>) {
        self.selected_cell = at.filter(|cell| self.cell(*cell).is_some());
    }

    /// Set the row or column span of a cell
    ///
    /// # Returns
    /// * `true` - The span was updated
    /// * `false` - The value was below 1 or the cell does not exist
    pub fn set_span(&mut self, at: CellRef, kind: SpanKind, value: u32) -> bool {
        if value < 1 {
            return false;
        }
        let Some(cell) = self.cell_mut(at) else {
            return false;
        };
        match kind {
            SpanKind::Row => cell.rowspan = value,
            SpanKind::Column => cell.colspan = value,
        }
        true
    }

    /// Reset a cell back to a single row and column and clear the focus
    pub fn split_cell(&mut self, at: CellRef) -> bool {
        let Some(cell) = self.cell_mut(at) else {
            return false;
        };
        cell.rowspan = 1;
        cell.colspan = 1;
        self.selected_cell = None;
        true
    }

    /// Grow or shrink the table to `row_count` body rows and `column_count` columns
    ///
    /// A zero count leaves that dimension untouched. New header cells are
    /// labelled `Header n`, new body cells `Cell`. The cell focus is cleared.
    pub fn resize(&mut self, row_count: usize, column_count: usize) {
        let current_cols = self.headers.len();
        if column_count > 0 && column_count != current_cols {
            if column_count > current_cols {
                for i in current_cols..column_count {
                    self.headers.push(TableCell::new(format!("Header {}", i + 1)));
                    for row in &mut self.rows {
                        row.push(TableCell::new("Cell"));
                    }
                }
            } else {
                self.headers.truncate(column_count);
                for row in &mut self.rows {
                    row.truncate(column_count);
                }
            }
        }

        let current_rows = self.rows.len();
        if row_count > 0 && row_count != current_rows {
            if row_count > current_rows {
                let cols = self.headers.len();
                for _ in current_rows..row_count {
                    self.rows.push((0..cols).map(|_| TableCell::new("Cell")).collect());
                }
            } else {
                self.rows.truncate(row_count);
            }
        }

        self.selected_cell = None;
    }

    /// Compute which cells are visible and how far each one spans
    pub fn layout(&self) -> TableLayout<'_> {
        let columns = self.column_count();

        let mut header = Vec::new();
        let mut col = 0;
        while col < self.headers.len() {
            let cell = &self.headers[col];
            let colspan = clamp_span(cell.colspan, columns - col);
            header.push(PlacedCell {
                row: 0,
                col,
                rowspan: 1,
                colspan,
                cell,
            });
            col += colspan;
        }

        let mut coverage = CoverageGrid::new(self.rows.len(), columns);
        let mut rows = Vec::with_capacity(self.rows.len());
        for (i, row) in self.rows.iter().enumerate() {
            let mut placed = Vec::new();
            for (j, cell) in row.iter().enumerate().take(columns) {
                if coverage.is_covered(i, j) {
                    continue;
                }
                let rowspan = clamp_span(cell.rowspan, self.rows.len() - i);
                let colspan = clamp_span(cell.colspan, columns - j);
                coverage.cover(i, j, rowspan, colspan);
                placed.push(PlacedCell {
                    row: i,
                    col: j,
                    rowspan,
                    colspan,
                    cell,
                });
            }
            rows.push(placed);
        }

        TableLayout {
            columns,
            header,
            rows,
            coverage,
        }
    }
}

fn clamp_span(span: u32, available: usize) -> usize {
    (span.max(1) as usize).min(available.max(1))
}

/// Explicit grid of body positions hidden beneath a spanning cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageGrid {
    rows: usize,
    columns: usize,
    covered: Vec<bool>,
}

impl CoverageGrid {
    fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            covered: vec![false; rows * columns],
        }
    }

    /// Mark every position under a span as covered, except its anchor
    fn cover(&mut self, row: usize, col: usize, rowspan: usize, colspan: usize) {
        for r in row..(row + rowspan).min(self.rows) {
            for c in col..(col + colspan).min(self.columns) {
                if (r, c) != (row, col) {
                    self.covered[r * self.columns + c] = true;
                }
            }
        }
    }

    /// Whether a position is hidden; positions outside the grid are not
    pub fn is_covered(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.columns && self.covered[row * self.columns + col]
    }
}

/// A visible cell with its clamped spans
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedCell<'a> {
    pub row: usize,
    pub col: usize,
    pub rowspan: usize,
    pub colspan: usize,
    pub cell: &'a TableCell,
}

/// Result of [`TableProps::layout`]
#[derive(Debug, Clone)]
pub struct TableLayout<'a> {
    pub columns: usize,
    pub header: Vec<PlacedCell<'a>>,
    pub rows: Vec<Vec<PlacedCell<'a>>>,
    pub coverage: CoverageGrid,
}
