//! Cell-related types
//!
//! - [`CellValue`] - The value stored in a cell
//! - [`CellAddress`] - A cell's location (e.g., "A1")
//! - [`CellRange`] - A rectangular block of cells (e.g., "A1:B10"), also used
//!   for merge regions
//! - [`CellData`] - A cell's value together with its display format

mod address;
mod data;
mod value;

pub use address::{CellAddress, CellRange};
pub use data::CellData;
pub use value::{CellError, CellValue, SharedString};
