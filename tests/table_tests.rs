//! Tabular view controller tests
//!
//! Covers the filter -> stable sort -> paginate pipeline and the derived
//! columns:
//! - Derived percent and delta, including across page boundaries
//! - Stable sorting and toggle cycles with tied keys
//! - Filtering always against the full dataset
//! - Page clamping and pager metadata

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic,
    clippy::cast_possible_truncation,
    clippy::cast_lossless
)]

mod common;
mod fixtures;

use common::{loaded_table, positions, values};
use fixtures::CurveBuilder;
use tabview::config::{FilterCase, ViewConfig};
use tabview::table::{SortColumn, SortDirection, SortIndicator, TableController};
use test_case::test_case;

/// Five rows with two tied values (5.0 x3, 7.0 x2).
fn tied() -> CurveBuilder {
    CurveBuilder::new()
        .point(0.1, 5.0)
        .point(0.2, 7.0)
        .point(0.3, 5.0)
        .point(0.4, 7.0)
        .point(0.5, 5.0)
        .total(10.0)
}

/// 45 rows, 0.1 m apart, 5 kL per step.
fn curve45() -> CurveBuilder {
    CurveBuilder::linear(45, 0.1, 5.0).total(225.0)
}

// ============================================================================
// Derived columns
// ============================================================================

#[test]
fn test_first_row_delta_is_its_own_value() {
    let table = loaded_table(&curve45());
    let first = table.derived_row(0).unwrap();
    assert_eq!(first.delta, first.cumulative_value);
    assert_eq!(first.delta, 5.0);
}

#[test]
fn test_percent_of_total() {
    let table = loaded_table(&curve45());
    let last = table.derived_row(44).unwrap();
    assert_eq!(last.percent_of_total, 100.0);
    let page = table.current_page();
    assert_eq!(page.rows[0].percent_of_total, "2.2%");
}

#[test]
fn test_zero_total_yields_zero_percent() {
    let table = loaded_table(&CurveBuilder::new().point(0.1, 3.0).total(0.0));
    assert_eq!(table.derived_row(0).unwrap().percent_of_total, 0.0);
    assert_eq!(table.current_page().rows[0].percent_of_total, "0.0%");
}

#[test]
fn test_delta_crosses_page_boundary() {
    let mut table = loaded_table(&curve45());
    table.set_page(1);
    let rows = table.page_rows();
    // 105 kL minus the last row of page 1 (100 kL), not its own value
    assert_eq!(rows[0].cumulative_value, 105.0);
    assert_eq!(rows[0].delta, 5.0);
}

#[test]
fn test_delta_follows_filtered_view() {
    let mut table = loaded_table(&curve45());
    table.set_filter("25");
    // Matches 25, 125, 225
    assert_eq!(values(&table), [25.0, 125.0, 225.0]);
    let rows = table.derived_rows();
    assert_eq!(rows[0].delta, 25.0);
    assert_eq!(rows[1].delta, 100.0);
    assert_eq!(rows[2].delta, 100.0);
}

#[test]
fn test_display_strings() {
    let table = loaded_table(
        &CurveBuilder::new()
            .point(1.5, 1234.5678)
            .point(1.6, 1300.0)
            .total(2000.0),
    );
    let page = table.current_page();
    let row = &page.rows[1];
    assert_eq!(row.position, "1.60");
    assert_eq!(row.cumulative_value, "1,300.000");
    assert_eq!(row.percent_of_total, "65.0%");
    assert_eq!(row.delta, "65.432");
}

// ============================================================================
// Sorting
// ============================================================================

#[test]
fn test_sort_is_stable_on_ties() {
    let mut table = loaded_table(&tied());
    table.toggle_sort(SortColumn::CumulativeValue);
    assert_eq!(positions(&table), [0.1, 0.3, 0.5, 0.2, 0.4]);

    table.toggle_sort(SortColumn::CumulativeValue);
    assert_eq!(table.params().sort_direction, SortDirection::Descending);
    assert_eq!(positions(&table), [0.2, 0.4, 0.1, 0.3, 0.5]);
}

#[test]
fn test_repeated_sort_keeps_tie_order() {
    let mut table = loaded_table(&tied());
    table.toggle_sort(SortColumn::CumulativeValue);
    let first = positions(&table);
    table.toggle_sort(SortColumn::CumulativeValue);
    table.toggle_sort(SortColumn::CumulativeValue);
    assert_eq!(positions(&table), first);
}

#[test]
fn test_toggle_twice_restores_ascending() {
    let mut table = loaded_table(&tied());
    let original = positions(&table);
    table.toggle_sort(SortColumn::Position);
    assert_eq!(table.sort_indicator(SortColumn::Position), SortIndicator::Descending);
    table.toggle_sort(SortColumn::Position);
    assert_eq!(table.sort_indicator(SortColumn::Position), SortIndicator::Ascending);
    assert_eq!(positions(&table), original);
}

#[test]
fn test_new_column_starts_ascending() {
    let mut table = loaded_table(&tied());
    table.toggle_sort(SortColumn::Position);
    table.toggle_sort(SortColumn::CumulativeValue);
    assert_eq!(table.params().sort_key, SortColumn::CumulativeValue);
    assert_eq!(table.params().sort_direction, SortDirection::Ascending);
    assert_eq!(table.sort_indicator(SortColumn::Position), SortIndicator::Unsorted);
}

#[test]
fn test_sort_never_mutates_dataset() {
    let builder = tied();
    let mut table = loaded_table(&builder);
    table.toggle_sort(SortColumn::CumulativeValue);
    table.toggle_sort(SortColumn::CumulativeValue);
    assert_eq!(table.dataset(), &builder.dataset());
}

// ============================================================================
// Filtering
// ============================================================================

#[test_case("", 45 ; "empty query is identity")]
#[test_case("2.5", 1 ; "matches position text")]
#[test_case("25", 3 ; "matches value text")]
#[test_case("4.", 5 ; "partial decimal")]
#[test_case("xyz", 0 ; "no match")]
fn test_filter_counts(query: &str, expected: usize) {
    let mut table = loaded_table(&curve45());
    table.set_filter(query);
    assert_eq!(table.view().len(), expected);
    assert_eq!(table.current_page().total_entries, 45);
}

#[test]
fn test_clearing_filter_restores_sorted_order() {
    let mut table = loaded_table(&tied());
    table.toggle_sort(SortColumn::CumulativeValue);
    table.toggle_sort(SortColumn::CumulativeValue);
    let before = positions(&table);

    table.set_filter("7");
    assert_eq!(positions(&table), [0.2, 0.4]);
    table.set_filter("");
    assert_eq!(positions(&table), before);
}

#[test]
fn test_filter_runs_against_full_dataset() {
    let mut table = loaded_table(&curve45());
    table.set_filter("225");
    assert_eq!(table.view().len(), 1);
    // A wider query after a narrow one sees every row again
    table.set_filter("2");
    assert!(table.view().len() > 1);
    assert!(values(&table).contains(&20.0));
}

#[test]
fn test_filter_resets_page() {
    let mut table = loaded_table(&curve45());
    table.set_page(2);
    table.set_filter("1");
    assert_eq!(table.params().page_index, 0);
}

#[test]
fn test_sensitive_filter_config() {
    let config = ViewConfig {
        filter_case: FilterCase::Sensitive,
        ..ViewConfig::default()
    };
    let mut table = TableController::new(&config);
    table.load(curve45().dataset());
    table.set_filter("4.5");
    assert_eq!(positions(&table), [4.5]);
}

// ============================================================================
// Pagination
// ============================================================================

#[test]
fn test_forty_five_rows_make_three_pages() {
    let table = loaded_table(&curve45());
    assert_eq!(table.total_pages(), 3);
    let page = table.current_page();
    assert_eq!(page.page.label, "Page 1 of 3");
    assert_eq!(page.rows.len(), 20);
    assert!(!page.page.has_previous);
    assert!(page.page.has_next);
    assert_eq!(page.total_label, "Total entries: 45");
}

#[test]
fn test_next_on_last_page_is_noop() {
    let mut table = loaded_table(&curve45());
    table.set_page(2);
    assert_eq!(table.params().page_index, 2);
    let last = table.current_page();
    assert_eq!(last.rows.len(), 5);
    assert!(!last.page.has_next);

    table.set_page(1);
    assert_eq!(table.params().page_index, 2);
    assert_eq!(table.current_page(), last);
}

#[test_case(-1, 0 ; "previous on first page")]
#[test_case(1, 1 ; "next")]
#[test_case(99, 2 ; "clamps high")]
#[test_case(-99, 0 ; "clamps low")]
fn test_set_page_clamps(delta: i64, expected: usize) {
    let mut table = loaded_table(&curve45());
    table.set_page(delta);
    assert_eq!(table.params().page_index, expected);
}

#[test]
fn test_sort_returns_to_first_page() {
    let mut table = loaded_table(&curve45());
    table.set_page(1);
    table.toggle_sort(SortColumn::CumulativeValue);
    assert_eq!(table.params().page_index, 0);
}

#[test]
fn test_reload_resets_view() {
    let mut table = loaded_table(&curve45());
    table.set_filter("1");
    table.toggle_sort(SortColumn::CumulativeValue);
    table.load(tied().dataset());
    assert!(table.params().filter_text.is_empty());
    assert_eq!(table.params().sort_key, SortColumn::Position);
    assert_eq!(table.params().sort_direction, SortDirection::Ascending);
    assert_eq!(table.view().len(), 5);
}

#[test]
fn test_custom_page_size() {
    let config = ViewConfig {
        page_size: 10,
        ..ViewConfig::default()
    };
    let mut table = TableController::new(&config);
    table.load(curve45().dataset());
    assert_eq!(table.total_pages(), 5);
}
