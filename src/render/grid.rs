//! Addressable grid projection of 2-D sheet cells.

use serde::Serialize;

use crate::cell_ref::col_to_letters;
use crate::numfmt::format_value;
use crate::types::{GridCell, GridRows};

/// Shown instead of a grid when the sheet has no rows.
pub const NO_DATA_MESSAGE: &str = "No data to display.";

/// Hover title for formula cells.
pub const FORMULA_CELL_TITLE: &str = "Formula cell";

/// Result of [`render_grid`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum GridView {
    NoData { message: String },
    Table(RenderedGrid),
}

impl GridView {
    pub fn as_table(&self) -> Option<&RenderedGrid> {
        match self {
            Self::Table(grid) => Some(grid),
            Self::NoData { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedGrid {
    /// Corner cell (always empty) followed by one letter label per column.
    pub header: Vec<String>,
    pub rows: Vec<RenderedRow>,
    /// Source row count before truncation
    pub total_rows: usize,
    /// Present only when rows were truncated.
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedRow {
    /// 1-based
    pub number: usize,
    pub cells: Vec<RenderedCell>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedCell {
    pub text: String,
    pub is_formula: bool,
    pub title: Option<String>,
}

impl RenderedCell {
    fn from_cell(cell: Option<&GridCell>) -> Self {
        let Some(cell) = cell else {
            return Self::default();
        };
        let is_formula = cell.is_formula();
        Self {
            text: format_value(&cell.value),
            is_formula,
            title: is_formula.then(|| FORMULA_CELL_TITLE.to_string()),
        }
    }
}

/// Project `rows` into a display grid of at most `max_rows` data rows.
///
/// The column count is the widest row across all input rows, not just the
/// rendered ones. Holes and short rows render as blank cells.
pub fn render_grid(rows: &GridRows, max_rows: usize) -> GridView {
    if rows.is_empty() {
        return GridView::NoData {
            message: NO_DATA_MESSAGE.to_string(),
        };
    }

    let max_cols = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut header = Vec::with_capacity(max_cols + 1);
    header.push(String::new());
    for col in 0..max_cols {
        header.push(col_to_letters(u32::try_from(col).unwrap_or(u32::MAX)));
    }

    let rendered = rows
        .iter()
        .take(max_rows)
        .enumerate()
        .map(|(i, row)| RenderedRow {
            number: i + 1,
            cells: (0..max_cols)
                .map(|c| RenderedCell::from_cell(row.get(c).and_then(Option::as_ref)))
                .collect(),
        })
        .collect();

    let total_rows = rows.len();
    let note = (total_rows > max_rows)
        .then(|| format!("Showing first {max_rows} rows of {total_rows} total rows."));

    GridView::Table(RenderedGrid {
        header,
        rows: rendered,
        total_rows,
        note,
    })
}
