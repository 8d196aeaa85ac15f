//! Row views used during iteration

use crate::cell::CellData;

/// A row of a worksheet with its cells in ascending column order
///
/// Columns may be sparse: a row holds only the cells that exist in the
/// document.
#[derive(Debug)]
pub struct RowData<'a> {
    /// Row index (0-based)
    pub index: u32,
    /// Cells in this row, keyed by column index
    pub cells: Vec<(u16, &'a CellData)>,
}

impl<'a> RowData<'a> {
    /// Create a new row view
    pub fn new(index: u32, cells: Vec<(u16, &'a CellData)>) -> Self {
        Self { index, cells }
    }
}
