//! Plain-data renderers. Output is handed to the host as-is; nothing in
//! here touches the DOM.

mod grid;
mod sections;

pub use grid::*;
pub use sections::*;
