//! # sheet2html-xlsx
//!
//! XLSX (Office Open XML) workbook reader for sheet2html.
//!
//! The reader loads everything the HTML renderer needs from a workbook:
//! sheet names and order, cell values with their number formats, merge
//! regions, hyperlinks and the workbook's date system. Styling beyond number
//! formats is ignored.

pub mod error;
pub mod reader;

mod styles;

pub use error::{XlsxError, XlsxResult};
pub use reader::XlsxReader;
