//! Prelude module - common imports for sheet2html users
//!
//! ```rust
//! use sheet2html::prelude::*;
//! ```

pub use crate::{
    // Conversion
    default_title,
    is_stdout_target,
    CellFormatter,
    Converter,
    DefaultCellFormatter,
    // Errors
    Error,
    HtmlOptions,
    HtmlWriter,
    Result,
    SheetSelection,
    // Model
    Workbook,
    WorkbookExt,
    Worksheet,
    XlsxReader,
};
