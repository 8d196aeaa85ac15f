//! Error types for conversions

use std::path::PathBuf;

use sheet2html_xlsx::XlsxError;
use thiserror::Error;

/// Result type for conversions
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced to users of the converter
#[derive(Debug, Error)]
pub enum Error {
    /// The input could not be read as a workbook
    #[error("failed to read workbook '{}'", path.display())]
    DocumentRead {
        path: PathBuf,
        #[source]
        source: XlsxError,
    },

    /// The HTML could not be written to its destination
    #[error("failed to write '{}'", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
