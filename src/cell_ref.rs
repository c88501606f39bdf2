//! Spreadsheet-style cell addressing ("A1" notation).
//!
//! Rows and columns are 0-indexed internally; labels use 1-based rows and
//! bijective base-26 column letters (A..Z, AA, AB, ...).

/// Convert a 0-based column index to column letters.
pub fn col_to_letters(col: u32) -> String {
    let mut result = String::new();
    let mut n = u64::from(col) + 1;
    while n > 0 {
        n -= 1;
        #[allow(clippy::cast_possible_truncation)]
        let c = char::from(b'A' + (n % 26) as u8);
        result.insert(0, c);
        n /= 26;
    }
    result
}

/// Label for a 0-based (row, col) pair, e.g. `(0, 0)` -> `"A1"`.
pub fn to_label(row: u32, col: u32) -> String {
    let mut label = col_to_letters(col);
    label.push_str(&(u64::from(row) + 1).to_string());
    label
}

/// Parse a label like "B3" or "$AA$10" into 0-based (row, col).
///
/// Letters must precede digits; anything else is rejected.
pub fn parse_label(label: &str) -> Option<(u32, u32)> {
    let mut col: u32 = 0;
    let mut row: u32 = 0;
    let mut saw_col = false;
    let mut saw_row = false;

    for ch in label.trim().chars() {
        if ch == '$' {
            continue;
        }
        if ch.is_ascii_alphabetic() {
            if saw_row {
                return None;
            }
            let upper = ch.to_ascii_uppercase();
            col = col
                .checked_mul(26)?
                .checked_add(u32::from(upper) - u32::from('A') + 1)?;
            saw_col = true;
        } else if let Some(digit) = ch.to_digit(10) {
            if !saw_col {
                return None;
            }
            row = row.checked_mul(10)?.checked_add(digit)?;
            saw_row = true;
        } else {
            return None;
        }
    }

    if !saw_col || !saw_row || row == 0 {
        return None;
    }

    Some((row - 1, col - 1))
}

/// Parse a label, reporting failures as [`TabviewError::CellRef`](crate::error::TabviewError).
pub fn require_label(label: &str) -> crate::error::Result<(u32, u32)> {
    parse_label(label).ok_or_else(|| crate::error::TabviewError::CellRef(label.to_string()))
}
