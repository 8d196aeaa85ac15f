//! # sheet2html-core
//!
//! Core data structures for the sheet2html converter.
//!
//! This crate provides the read-only document model that the workbook reader
//! produces and the HTML renderer consumes:
//! - [`CellValue`] - Cell values (numbers, strings, booleans, errors, formulas)
//! - [`CellAddress`] and [`CellRange`] - Cell addressing and merge regions
//! - [`NumberFormat`] - Display formats, used to tell dates from plain numbers
//! - [`Hyperlink`] - Links attached to a cell or a block of cells
//! - [`Workbook`], [`Worksheet`] - The document structures
//!
//! ## Example
//!
//! ```rust
//! use sheet2html_core::{CellRange, Workbook};
//!
//! let mut workbook = Workbook::new();
//! let sheet = workbook.worksheet_mut(0).unwrap();
//!
//! sheet.set_cell_value("A1", "Quarter").unwrap();
//! sheet.set_cell_value_at(1, 0, 42.0).unwrap();
//! sheet.merge_cells(&CellRange::parse("A1:B1").unwrap()).unwrap();
//!
//! assert_eq!(sheet.merged_regions().len(), 1);
//! ```

pub mod cell;
pub mod date;
pub mod error;
pub mod hyperlink;
pub mod number_format;
pub mod row;
pub mod workbook;
pub mod worksheet;

// Re-exports for convenience
pub use cell::{CellAddress, CellData, CellError, CellRange, CellValue, SharedString};
pub use error::{Error, Result};
pub use hyperlink::{Hyperlink, HyperlinkTarget};
pub use number_format::NumberFormat;
pub use row::RowData;
pub use workbook::{Workbook, WorkbookSettings};
pub use worksheet::Worksheet;

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u16 = 16_384;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;
