//! # sheet2html
//!
//! Convert spreadsheets to HTML tables.
//!
//! Every sheet of a workbook becomes one `<table>`. Merged regions become a
//! single `<td>` with `rowspan`/`colspan`, date cells are shown as dates,
//! numbers are grouped, and hyperlinks become anchors.
//!
//! ## Example
//!
//! ```rust,no_run
//! use sheet2html::prelude::*;
//!
//! let converter = Converter::new(HtmlOptions::default());
//!
//! // Title defaults to the file name without its extension ("report")
//! let html = converter.convert_file("report.xlsx", None)?;
//! println!("{}", html);
//!
//! converter.convert_to_file("report.xlsx", "report.html", Some("Q3 Report"))?;
//! # Ok::<(), sheet2html::Error>(())
//! ```

mod converter;
mod error;
pub mod prelude;

pub use converter::{default_title, is_stdout_target, Converter};
pub use error::{Error, Result};

// Re-export core types
pub use sheet2html_core::{
    CellAddress, CellData, CellError, CellRange, CellValue, Hyperlink, HyperlinkTarget,
    NumberFormat, Workbook, WorkbookSettings, Worksheet,
};

// Re-export rendering types
pub use sheet2html_render::{
    render_sheet, CellContent, CellFormatter, CellPlacement, CellRef, DateFormatter,
    DefaultCellFormatter, HtmlOptions, HtmlWriter, MergeIndex, NumberLocale, RenderError,
    SheetSelection, TableRenderer, DEFAULT_DATE_PATTERN,
};

// Re-export I/O types
pub use sheet2html_xlsx::{XlsxError, XlsxReader};

use std::path::Path;

/// Extension trait for Workbook to add file I/O and rendering
pub trait WorkbookExt {
    /// Open a workbook from a file
    fn open<P: AsRef<Path>>(path: P) -> Result<Workbook>;

    /// Render the workbook with the default cell formatter
    fn to_html(&self, options: &HtmlOptions) -> String;
}

impl WorkbookExt for Workbook {
    fn open<P: AsRef<Path>>(path: P) -> Result<Workbook> {
        let path = path.as_ref();
        XlsxReader::read_file(path).map_err(|source| Error::DocumentRead {
            path: path.to_path_buf(),
            source,
        })
    }

    fn to_html(&self, options: &HtmlOptions) -> String {
        HtmlWriter::render_workbook(self, &DefaultCellFormatter::default(), options)
    }
}
