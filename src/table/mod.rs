//! Tabular view controller.
//!
//! Owns the loaded [`Dataset`] and the current [`ViewParams`], and derives
//! the visible page from them. The materialized [`View`] is rebuilt from
//! the dataset on every interaction; nothing is patched incrementally, so
//! the filter always runs against the full dataset and never against a
//! previously filtered or sorted sequence.
//!
//! Derived columns (percent of total, delta from the previous row) are
//! computed against the materialized sequence: the "previous row" of the
//! first row on page 2 is the last row on page 1, and after a descending
//! sort deltas come out negative.

mod filter;
mod page;
mod sort;

pub use filter::{number_to_plain_string, RowFilter};
pub use page::{clamp_page, page_range, total_pages, PageInfo};
pub use sort::{sort_rows, SortColumn, SortDirection, SortIndicator};

use serde::Serialize;

use crate::config::{FilterCase, ViewConfig};
use crate::numfmt::{self, CUMULATIVE_DECIMALS, DELTA_DECIMALS, POSITION_DECIMALS};
use crate::types::{DataPoint, Dataset};

/// Column headings shared by the on-screen table and the CSV export.
pub const COLUMN_HEADERS: [&str; 4] = ["Height (m)", "Capacity (kL)", "% Full", "Volume Added (kL)"];

/// User-controlled view parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewParams {
    pub filter_text: String,
    pub sort_key: SortColumn,
    pub sort_direction: SortDirection,
    /// 0-based
    pub page_index: usize,
    pub page_size: usize,
}

impl ViewParams {
    pub fn new(page_size: usize) -> Self {
        Self {
            filter_text: String::new(),
            sort_key: SortColumn::Position,
            sort_direction: SortDirection::Ascending,
            page_index: 0,
            page_size: page_size.max(1),
        }
    }
}

/// Filtered and sorted rows for the current parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct View {
    rows: Vec<DataPoint>,
}

impl View {
    /// Filter the full dataset, then stable-sort the survivors.
    pub fn derive(dataset: &Dataset, params: &ViewParams, case: FilterCase) -> Self {
        let filter = RowFilter::new(&params.filter_text, case);
        let mut rows: Vec<DataPoint> = dataset
            .points()
            .iter()
            .filter(|p| filter.matches(p))
            .copied()
            .collect();
        sort_rows(&mut rows, params.sort_key, params.sort_direction);
        Self { rows }
    }

    pub fn rows(&self) -> &[DataPoint] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A materialized row plus its derived columns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedRow {
    pub position: f64,
    pub cumulative_value: f64,
    pub percent_of_total: f64,
    /// Difference from the previous materialized row; the first row's own value.
    pub delta: f64,
}

impl DerivedRow {
    /// Display strings for this row.
    pub fn display(&self) -> DisplayRow {
        DisplayRow {
            position: numfmt::fixed(self.position, POSITION_DECIMALS),
            cumulative_value: numfmt::fixed_grouped(self.cumulative_value, CUMULATIVE_DECIMALS),
            percent_of_total: numfmt::percent(self.percent_of_total),
            delta: numfmt::fixed(self.delta, DELTA_DECIMALS),
        }
    }
}

/// `cumulative / total * 100`, or 0 when the total is not positive.
pub fn percent_of_total(cumulative_value: f64, total: f64) -> f64 {
    if total > 0.0 && total.is_finite() {
        cumulative_value / total * 100.0
    } else {
        0.0
    }
}

/// Formatted cells of one table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayRow {
    pub position: String,
    pub cumulative_value: String,
    pub percent_of_total: String,
    pub delta: String,
}

impl DisplayRow {
    pub fn cells(&self) -> [&str; 4] {
        [
            &self.position,
            &self.cumulative_value,
            &self.percent_of_total,
            &self.delta,
        ]
    }
}

/// Everything the host needs to draw the table for the current page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TablePage {
    pub headers: [&'static str; 4],
    pub sort_indicators: [SortIndicator; 2],
    pub rows: Vec<DisplayRow>,
    pub page: PageInfo,
    /// Rows matching the current filter
    pub matching_entries: usize,
    /// Rows in the loaded dataset
    pub total_entries: usize,
    /// "Total entries: N"
    pub total_label: String,
}

/// Filter, sort and paginate a [`Dataset`].
#[derive(Debug, Clone)]
pub struct TableController {
    dataset: Dataset,
    params: ViewParams,
    filter_case: FilterCase,
    view: View,
}

impl Default for TableController {
    fn default() -> Self {
        Self::new(&ViewConfig::default())
    }
}

impl TableController {
    pub fn new(config: &ViewConfig) -> Self {
        Self {
            dataset: Dataset::empty(),
            params: ViewParams::new(config.page_size),
            filter_case: config.filter_case,
            view: View::default(),
        }
    }

    /// Replace the dataset and reset the view: no filter, ascending by
    /// position, first page.
    pub fn load(&mut self, dataset: Dataset) {
        log::debug!("table: loaded {} rows (total {})", dataset.len(), dataset.total());
        self.dataset = dataset;
        self.params = ViewParams::new(self.params.page_size);
        self.rebuild();
    }

    /// Set the filter query and return to the first page.
    pub fn set_filter(&mut self, query: &str) {
        self.params.filter_text = query.to_string();
        self.params.page_index = 0;
        self.rebuild();
    }

    /// Sort by `column`. Selecting the active column flips direction; a new
    /// column starts ascending. Returns to the first page.
    pub fn toggle_sort(&mut self, column: SortColumn) {
        if self.params.sort_key == column {
            self.params.sort_direction = self.params.sort_direction.flipped();
        } else {
            self.params.sort_key = column;
            self.params.sort_direction = SortDirection::Ascending;
        }
        self.params.page_index = 0;
        self.rebuild();
    }

    /// Move by `delta` pages, clamped to `[0, total_pages - 1]`.
    pub fn set_page(&mut self, delta: i64) {
        let total = self.total_pages();
        self.params.page_index = clamp_page(self.params.page_index, delta, total);
        self.rebuild();
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn params(&self) -> &ViewParams {
        &self.params
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.view.len(), self.params.page_size)
    }

    /// Derived columns for materialized row `index`.
    pub fn derived_row(&self, index: usize) -> Option<DerivedRow> {
        let rows = self.view.rows();
        let point = rows.get(index)?;
        let previous = index
            .checked_sub(1)
            .and_then(|i| rows.get(i))
            .map_or(0.0, |p| p.cumulative_value);
        Some(DerivedRow {
            position: point.position,
            cumulative_value: point.cumulative_value,
            percent_of_total: percent_of_total(point.cumulative_value, self.dataset.total()),
            delta: point.cumulative_value - previous,
        })
    }

    /// Derived rows for the whole materialized sequence (all pages).
    pub fn derived_rows(&self) -> Vec<DerivedRow> {
        (0..self.view.len())
            .filter_map(|i| self.derived_row(i))
            .collect()
    }

    /// Derived rows on the current page.
    pub fn page_rows(&self) -> Vec<DerivedRow> {
        page_range(self.params.page_index, self.params.page_size, self.view.len())
            .filter_map(|i| self.derived_row(i))
            .collect()
    }

    pub fn sort_indicator(&self, column: SortColumn) -> SortIndicator {
        if self.params.sort_key != column {
            return SortIndicator::Unsorted;
        }
        match self.params.sort_direction {
            SortDirection::Ascending => SortIndicator::Ascending,
            SortDirection::Descending => SortIndicator::Descending,
        }
    }

    pub fn page_info(&self) -> PageInfo {
        PageInfo::new(self.params.page_index, self.total_pages())
    }

    /// Render the current page.
    pub fn current_page(&self) -> TablePage {
        let total_entries = self.dataset.len();
        TablePage {
            headers: COLUMN_HEADERS,
            sort_indicators: [
                self.sort_indicator(SortColumn::Position),
                self.sort_indicator(SortColumn::CumulativeValue),
            ],
            rows: self.page_rows().iter().map(DerivedRow::display).collect(),
            page: self.page_info(),
            matching_entries: self.view.len(),
            total_entries,
            total_label: format!("Total entries: {total_entries}"),
        }
    }

    fn rebuild(&mut self) {
        self.view = View::derive(&self.dataset, &self.params, self.filter_case);
        let last = self.total_pages().saturating_sub(1);
        self.params.page_index = self.params.page_index.min(last);
    }
}
