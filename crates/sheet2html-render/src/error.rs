//! Render error types

use thiserror::Error;

/// Result type for render operations
pub type RenderResult<T> = std::result::Result<T, RenderError>;

/// Errors that can occur while rendering or writing HTML
#[derive(Debug, Error)]
pub enum RenderError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Date pattern that chrono cannot format with
    #[error("Invalid date pattern: {0}")]
    InvalidDatePattern(String),
}
