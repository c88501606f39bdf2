//! Lenient numeric parsing.
//!
//! Calculator-style inputs never fail on a bad number: anything that does not
//! parse (or parses to a non-finite value) becomes `0.0`. Every numeric field
//! read from the wire or from a user input goes through this module so the
//! policy is applied the same way everywhere.

use std::fmt;

use serde::de::{self, Deserializer, Visitor};

/// Parse the longest numeric prefix of `text`, defaulting to `0.0`.
///
/// Mirrors the usual browser `parseFloat(text) || 0` idiom: leading
/// whitespace is skipped, trailing garbage after a valid prefix is ignored.
///
/// ```
/// use tabview::lenient::parse_number;
/// assert_eq!(parse_number(" 12.5kg"), 12.5);
/// assert_eq!(parse_number("abc"), 0.0);
/// assert_eq!(parse_number("-3e2x"), -300.0);
/// ```
pub fn parse_number(text: &str) -> f64 {
    let trimmed = text.trim_start();
    let end = numeric_prefix_len(trimmed.as_bytes());
    trimmed
        .get(..end)
        .and_then(|prefix| prefix.parse::<f64>().ok())
        .map_or(0.0, sanitize)
}

/// Replace non-finite values with `0.0`.
pub fn sanitize(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Length of the `[+-]digits[.digits][e[+-]digits]` prefix, or 0 if there is none.
fn numeric_prefix_len(bytes: &[u8]) -> usize {
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    let int_start = i;
    while bytes.get(i).is_some_and(u8::is_ascii_digit) {
        i += 1;
    }
    let mut digits = i - int_start;

    if bytes.get(i) == Some(&b'.') {
        let frac_start = i + 1;
        let mut j = frac_start;
        while bytes.get(j).is_some_and(u8::is_ascii_digit) {
            j += 1;
        }
        digits += j - frac_start;
        if digits > 0 {
            i = j;
        }
    }

    if digits == 0 {
        return 0;
    }

    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_start = j;
        while bytes.get(j).is_some_and(u8::is_ascii_digit) {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }

    i
}

/// Serde adapter: accept a number, a numeric string, or null/garbage (-> 0).
///
/// Use with `#[serde(deserialize_with = "crate::lenient::number", default)]`.
pub fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(LenientNumber)
}

/// Serde adapter for row/column indices: [`number`], truncated toward zero.
/// Negatives become 0; values past `u32::MAX` saturate.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn index<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    number(deserializer).map(|v| v.trunc().max(0.0) as u32)
}

/// Serde adapter for counts; same rules as [`index`].
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn count<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    number(deserializer).map(|v| v.trunc().max(0.0) as usize)
}

struct LenientNumber;

impl<'de> Visitor<'de> for LenientNumber {
    type Value = f64;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number or numeric string")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
        Ok(sanitize(v))
    }

    #[allow(clippy::cast_precision_loss)]
    fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
        Ok(v as f64)
    }

    #[allow(clippy::cast_precision_loss)]
    fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
        Ok(v as f64)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
        Ok(parse_number(v))
    }

    fn visit_bool<E: de::Error>(self, _v: bool) -> Result<f64, E> {
        Ok(0.0)
    }

    fn visit_unit<E: de::Error>(self) -> Result<f64, E> {
        Ok(0.0)
    }

    fn visit_none<E: de::Error>(self) -> Result<f64, E> {
        Ok(0.0)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<f64, D::Error> {
        deserializer.deserialize_any(LenientNumber)
    }

    fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<f64, A::Error> {
        while seq.next_element::<de::IgnoredAny>()?.is_some() {}
        Ok(0.0)
    }

    fn visit_map<A: de::MapAccess<'de>>(self, mut map: A) -> Result<f64, A::Error> {
        while map.next_entry::<de::IgnoredAny, de::IgnoredAny>()?.is_some() {}
        Ok(0.0)
    }
}
