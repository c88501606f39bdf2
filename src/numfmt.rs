//! Number and text formatting for display and export.
//!
//! All fixed-precision output in the crate goes through [`fixed`], so the
//! table on screen and the exported CSV can never disagree on rounding.
//! Locale conventions are en-US: `,` groups thousands, `.` separates decimals.

use crate::types::CellValue;

/// Decimal places for the position (height) column.
pub const POSITION_DECIMALS: usize = 2;
/// Decimal places for the cumulative value (capacity) column.
pub const CUMULATIVE_DECIMALS: usize = 3;
/// Decimal places for the percent-of-total column.
pub const PERCENT_DECIMALS: usize = 1;
/// Decimal places for the delta (volume added) column.
pub const DELTA_DECIMALS: usize = 3;

/// Maximum fraction digits for the default locale number rendering.
const LOCALE_MAX_FRACTION_DIGITS: usize = 3;

/// Extra digits rendered before rounding so halfway cases can be seen.
const TIE_GUARD_DIGITS: usize = 30;

/// Render `value` with exactly `decimals` fraction digits.
///
/// Halfway cases round away from zero (`0.125` -> `"0.13"`), matching how
/// browsers implement `Number.prototype.toFixed`. A value that rounds to zero
/// is printed without a sign.
pub fn fixed(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return non_finite(value, "Infinity");
    }

    let expanded = format!("{:.*}", decimals + TIE_GUARD_DIGITS, value.abs());
    let (int_part, frac_part) = expanded.split_once('.').unwrap_or((expanded.as_str(), ""));

    let mut digits: Vec<u8> = int_part.bytes().collect();
    let mut int_len = digits.len();
    digits.extend(frac_part.bytes().take(decimals));
    let round_up = frac_part
        .as_bytes()
        .get(decimals)
        .is_some_and(|d| *d >= b'5');

    if round_up && increment_decimal(&mut digits) {
        digits.insert(0, b'1');
        int_len += 1;
    }

    let (int_digits, frac_digits) = digits.split_at(int_len);
    let mut out = String::with_capacity(digits.len() + 2);
    let is_zero = digits.iter().all(|d| *d == b'0');
    if value < 0.0 && !is_zero {
        out.push('-');
    }
    out.push_str(&String::from_utf8_lossy(int_digits));
    if decimals > 0 {
        out.push('.');
        out.push_str(&String::from_utf8_lossy(frac_digits));
    }
    out
}

/// [`fixed`] with thousands separators in the integer part.
pub fn fixed_grouped(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return non_finite(value, "∞");
    }
    group_thousands(&fixed(value, decimals))
}

/// Percentage display: one decimal and a `%` suffix.
pub fn percent(value: f64) -> String {
    format!("{}%", fixed(value, PERCENT_DECIMALS))
}

/// Default locale rendering of a number: grouped, at most three fraction
/// digits, trailing zeros dropped (`1234.5` -> `"1,234.5"`).
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return non_finite(value, "∞");
    }
    let rendered = fixed(value, LOCALE_MAX_FRACTION_DIGITS);
    let trimmed = if rendered.contains('.') {
        rendered.trim_end_matches('0').trim_end_matches('.')
    } else {
        rendered.as_str()
    };
    group_thousands(trimmed)
}

/// Render a raw cell value for display.
///
/// Blank values and empty strings render as `""`, numbers use
/// [`format_number`], everything else its plain string form.
pub fn format_value(value: &CellValue) -> String {
    match value {
        CellValue::Empty => String::new(),
        CellValue::Number(n) => format_number(*n),
        CellValue::Bool(b) => b.to_string(),
        CellValue::Text(s) => s.clone(),
    }
}

/// Insert `,` every three digits of the integer part of an already
/// formatted decimal string. A leading `-` is preserved.
pub fn group_thousands(formatted: &str) -> String {
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut with_sep = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            with_sep.push(',');
        }
        with_sep.push(c);
    }
    let int_with_sep: String = with_sep.chars().rev().collect();

    match frac_part {
        Some(frac) => format!("{sign}{int_with_sep}.{frac}"),
        None => format!("{sign}{int_with_sep}"),
    }
}

/// Add one unit in the last place of an ASCII digit string.
/// Returns true when the carry ran off the front (e.g. `"99"` -> `"00"`).
fn increment_decimal(digits: &mut [u8]) -> bool {
    for d in digits.iter_mut().rev() {
        if *d == b'9' {
            *d = b'0';
        } else {
            *d += 1;
            return false;
        }
    }
    true
}

fn non_finite(value: f64, infinity: &str) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_sign_negative() {
        format!("-{infinity}")
    } else {
        infinity.to_string()
    }
}
