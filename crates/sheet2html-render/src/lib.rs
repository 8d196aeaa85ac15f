//! # sheet2html-render
//!
//! Merge-aware HTML rendering for sheet2html.
//!
//! - [`MergeIndex`] - decides, per cell, whether it emits a `<td>` and with
//!   which `rowspan`/`colspan`
//! - [`TableRenderer`] - renders one worksheet as one `<table>`
//! - [`HtmlWriter`] - assembles a workbook's tables into a document
//! - [`CellFormatter`] - pluggable cell value formatting, with
//!   [`DefaultCellFormatter`] for dates, grouped numbers and hyperlinks
//!
//! ## Example
//!
//! ```rust
//! use sheet2html_core::{CellRange, Workbook};
//! use sheet2html_render::{DefaultCellFormatter, HtmlOptions, HtmlWriter};
//!
//! let mut workbook = Workbook::new();
//! let sheet = workbook.worksheet_mut(0).unwrap();
//! sheet.set_cell_value("A1", "Header").unwrap();
//! sheet.merge_cells(&CellRange::parse("A1:B1").unwrap()).unwrap();
//!
//! let html = HtmlWriter::render_workbook(
//!     &workbook,
//!     &DefaultCellFormatter::default(),
//!     &HtmlOptions::default().with_title("Report"),
//! );
//! assert!(html.contains("<td colspan=\"2\">Header</td>"));
//! ```

mod error;
mod formatter;
mod merge_index;
mod options;
mod table;
mod writer;

pub use error::{RenderError, RenderResult};
pub use formatter::{
    escape_html, wrap_hyperlink, CellContent, CellFormatter, CellRef, DateFormatter,
    DefaultCellFormatter, NumberLocale, DEFAULT_DATE_PATTERN,
};
pub use merge_index::{CellPlacement, MergeIndex};
pub use options::{HtmlOptions, SheetSelection};
pub use table::{render_sheet, TableRenderer};
pub use writer::{write_atomically, HtmlWriter};
