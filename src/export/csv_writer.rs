//! CSV serialization of derived table rows.

use std::fmt::Write as _;

use crate::numfmt::{
    fixed, CUMULATIVE_DECIMALS, DELTA_DECIMALS, PERCENT_DECIMALS, POSITION_DECIMALS,
};
use crate::table::{DerivedRow, COLUMN_HEADERS};

/// One CSV record per row, header first, every line `\n`-terminated.
///
/// Numbers are written ungrouped with the same rounding as the table
/// display.
pub fn serialize(rows: &[DerivedRow]) -> Vec<u8> {
    let mut out = String::with_capacity((rows.len() + 1) * 32);
    out.push_str(&COLUMN_HEADERS.join(","));
    out.push('\n');
    for row in rows {
        // Writing to a String cannot fail
        let _ = writeln!(
            out,
            "{},{},{},{}",
            fixed(row.position, POSITION_DECIMALS),
            fixed(row.cumulative_value, CUMULATIVE_DECIMALS),
            fixed(row.percent_of_total, PERCENT_DECIMALS),
            fixed(row.delta, DELTA_DECIMALS),
        );
    }
    out.into_bytes()
}
