//! Integration tests for tabview.
//!
//! This module provides the shared test infrastructure:
//!
//! - `fixtures`: Builders for service payloads (capacity curves, sheets)
//! - `common`: A scripted `CalcService` and controller helpers
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use crate::common::{loaded_table, positions};
//! use crate::fixtures::CurveBuilder;
//!
//! fn test_descending() {
//!     let mut table = loaded_table(&CurveBuilder::linear(5, 0.1, 1.0));
//!     table.toggle_sort(SortColumn::Position);
//!     assert_eq!(positions(&table), [0.5, 0.4, 0.3, 0.2, 0.1]);
//! }
//! ```
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic,
    clippy::cast_possible_truncation,
    clippy::cast_lossless
)]

pub mod common;
pub mod fixtures;
