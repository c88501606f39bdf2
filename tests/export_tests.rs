//! CSV export tests
//!
//! The export must carry every row of the current view (not just the
//! visible page) and round exactly like the on-screen table.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;
mod fixtures;

use common::loaded_table;
use fixtures::CurveBuilder;
use tabview::config::ViewConfig;
use tabview::export::{export_csv, export_to, serialize, MemorySink, CSV_MIME_TYPE};
use tabview::session::CapacitySession;
use tabview::table::SortColumn;

const HEADER: &str = "Height (m),Capacity (kL),% Full,Volume Added (kL)";

fn csv_lines(bytes: &[u8]) -> Vec<String> {
    String::from_utf8(bytes.to_vec())
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_export_rounding_matches_display() {
    let table = loaded_table(&CurveBuilder::new().point(0.1, 12.3456).total(100.0));
    let display = &table.current_page().rows[0];
    let lines = csv_lines(&serialize(&table.derived_rows()));
    let fields: Vec<&str> = lines[1].split(',').collect();

    assert_eq!(display.cumulative_value, "12.346");
    assert_eq!(fields[1], "12.346");
    assert_eq!(fields[0], display.position);
    assert_eq!(format!("{}%", fields[2]), display.percent_of_total);
    assert_eq!(fields[3], display.delta);
}

#[test]
fn test_export_is_ungrouped_but_same_digits() {
    let table = loaded_table(&CurveBuilder::new().point(12.0, 603_185.7891).total(603_185.7891));
    let display = &table.current_page().rows[0];
    let lines = csv_lines(&serialize(&table.derived_rows()));
    assert_eq!(display.cumulative_value, "603,185.789");
    assert_eq!(lines[1], "12.00,603185.789,100.0,603185.789");
    assert_eq!(display.cumulative_value.replace(',', ""), "603185.789");
}

#[test]
fn test_export_covers_all_pages_in_view_order() {
    let mut table = loaded_table(&CurveBuilder::linear(45, 0.1, 5.0).total(225.0));
    table.toggle_sort(SortColumn::Position);
    table.toggle_sort(SortColumn::Position);
    table.toggle_sort(SortColumn::Position);
    table.set_page(1);

    let file = export_csv(&table, "out.csv");
    let lines = csv_lines(&file.bytes);
    assert_eq!(lines.len(), 46);
    assert_eq!(lines[0], HEADER);
    // Descending: first data row is the tallest point, deltas go negative
    assert_eq!(lines[1], "4.50,225.000,100.0,225.000");
    assert_eq!(lines[2], "4.40,220.000,97.8,-5.000");
    assert_eq!(file.mime_type, CSV_MIME_TYPE);
}

#[test]
fn test_export_respects_filter() {
    let mut table = loaded_table(&CurveBuilder::linear(45, 0.1, 5.0).total(225.0));
    table.set_filter("25");
    let lines = csv_lines(&export_csv(&table, "x.csv").bytes);
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[2], "2.50,125.000,55.6,100.000");
}

#[test]
fn test_every_line_newline_terminated() {
    let table = loaded_table(&CurveBuilder::linear(3, 0.1, 1.0));
    let bytes = serialize(&table.derived_rows());
    let text = String::from_utf8(bytes).unwrap();
    assert!(text.ends_with('\n'));
    assert_eq!(text.matches('\n').count(), 4);
    assert!(!text.contains('\r'));
}

#[test]
fn test_empty_view_exports_header_only() {
    let mut table = loaded_table(&CurveBuilder::linear(3, 0.1, 1.0));
    table.set_filter("nothing matches");
    let text = String::from_utf8(serialize(&table.derived_rows())).unwrap();
    assert_eq!(text, format!("{HEADER}\n"));
}

#[test]
fn test_sink_receives_named_file() {
    let mut session = CapacitySession::new(ViewConfig::default());
    let ticket = session.begin_load();
    let body = CurveBuilder::linear(2, 0.1, 1.0).to_json();
    session.finish_load(ticket, tabview::remote::decode_response(200, &body));

    let mut sink = MemorySink::default();
    session.export_to(&mut sink).unwrap();
    assert_eq!(sink.files.len(), 1);
    assert_eq!(sink.files[0].file_name, "tank_capacity_curve.csv");
    assert_eq!(sink.files[0].mime_type, "text/csv");
    assert_eq!(csv_lines(&sink.files[0].bytes).len(), 3);
}

#[test]
fn test_export_to_helper() {
    let table = loaded_table(&CurveBuilder::linear(1, 0.1, 1.0));
    let mut sink = MemorySink::default();
    export_to(&table, "curve.csv", &mut sink).unwrap();
    assert_eq!(sink.files[0].file_name, "curve.csv");
}
