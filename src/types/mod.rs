//! Data types shared by the view controller, renderers and the service boundary.

mod cell;
mod dataset;
mod formula;
mod sheet;

pub use cell::*;
pub use dataset::*;
pub use formula::*;
pub use sheet::*;
