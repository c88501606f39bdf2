//! Pagination arithmetic. Page indices are 0-based here and 1-based in
//! anything shown to the user.

use std::ops::Range;

use serde::Serialize;

/// `max(1, ceil(len / page_size))`.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1)).max(1)
}

/// Move `current` by `delta` pages, clamped to the valid range.
pub fn clamp_page(current: usize, delta: i64, total: usize) -> usize {
    let last = total.saturating_sub(1);
    let magnitude = usize::try_from(delta.unsigned_abs()).unwrap_or(usize::MAX);
    let moved = if delta.is_negative() {
        current.saturating_sub(magnitude)
    } else {
        current.saturating_add(magnitude)
    };
    moved.min(last)
}

/// Row indices covered by `page`.
pub fn page_range(page: usize, page_size: usize, len: usize) -> Range<usize> {
    let start = page.saturating_mul(page_size).min(len);
    let end = start.saturating_add(page_size).min(len);
    start..end
}

/// Navigation metadata for the host's pager controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// 1-based current page
    pub current: usize,
    pub total: usize,
    pub has_previous: bool,
    pub has_next: bool,
    /// "Page X of Y"
    pub label: String,
}

impl PageInfo {
    pub fn new(page_index: usize, total: usize) -> Self {
        let current = page_index + 1;
        Self {
            current,
            total,
            has_previous: current > 1,
            has_next: current < total,
            label: format!("Page {current} of {total}"),
        }
    }
}
