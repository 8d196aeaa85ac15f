//! End-to-end tests for sheet2html-xlsx.
//!
//! Each test builds the exact workbook it needs in memory with the `zip`
//! writer, then reads it back with `XlsxReader` and asserts on the model.

mod common;
mod reading;

// Re-export common utilities for submodules
pub use common::*;
