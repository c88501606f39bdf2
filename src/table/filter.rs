//! Substring filter over the string form of both numeric fields.

use crate::config::FilterCase;
use crate::types::DataPoint;

/// Compiled filter query. An empty query passes every row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFilter {
    needle: String,
    case: FilterCase,
}

impl RowFilter {
    pub fn new(query: &str, case: FilterCase) -> Self {
        let needle = match case {
            FilterCase::Insensitive => query.to_lowercase(),
            FilterCase::Sensitive => query.to_string(),
        };
        Self { needle, case }
    }

    pub fn is_identity(&self) -> bool {
        self.needle.is_empty()
    }

    /// True if either field's plain string form contains the query.
    pub fn matches(&self, point: &DataPoint) -> bool {
        if self.is_identity() {
            return true;
        }
        self.field_matches(point.position) || self.field_matches(point.cumulative_value)
    }

    fn field_matches(&self, value: f64) -> bool {
        let text = number_to_plain_string(value);
        match self.case {
            FilterCase::Insensitive => text.to_lowercase().contains(&self.needle),
            FilterCase::Sensitive => text.contains(&self.needle),
        }
    }
}

/// Shortest round-trip form, as a browser prints a number (`0.1`, `12`).
///
/// Magnitudes below `1e-6` or at least `1e21` switch to exponent form with a
/// signed exponent (`1e-7`, `1.5e+21`), everything else is plain decimal.
pub fn number_to_plain_string(value: f64) -> String {
    if value == 0.0 {
        // Display prints -0.0 as "-0"
        return "0".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    let magnitude = value.abs();
    if magnitude.is_finite() && !(1e-6..1e21).contains(&magnitude) {
        let text = format!("{value:e}");
        return match text.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => text,
        };
    }
    value.to_string()
}
