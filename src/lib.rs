//! tabview - tabular view controller and grid addressing for browser-hosted
//! calculators
//!
//! Takes datasets and sheet payloads from a remote calculation service and
//! turns them into something a host page can draw:
//! - Filtered, sorted, paginated capacity tables with derived columns
//! - CSV export that matches the on-screen rounding
//! - A1-addressed sheet grids with formula cells marked
//! - Calculator input forms built from the references in formula text
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { CapacityTable, fetchJson } from 'tabview';
//! await init();
//! const table = new CapacityTable();
//! const ticket = table.beginLoad();
//! const { status, body } = await fetchJson("POST", "/api/calculate-capacity", JSON.stringify(inputs));
//! table.finishLoad(ticket, status, body);
//! render(table.currentPage());
//! ```

pub mod cell_ref;
pub mod config;
pub mod error;
pub mod export;
pub mod lenient;
pub mod numfmt;
pub mod references;
pub mod remote;
pub mod render;
pub mod session;
pub mod table;
pub mod types;

// Host adapters (wasm-bindgen)
pub mod viewer;

use wasm_bindgen::prelude::*;

pub use viewer::{CapacityTable, SheetViewer};

pub use types::*;

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
