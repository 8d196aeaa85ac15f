//! Worksheet type

use std::collections::BTreeMap;

use crate::cell::{CellAddress, CellData, CellRange, CellValue};
use crate::error::{Error, Result};
use crate::hyperlink::Hyperlink;
use crate::number_format::NumberFormat;
use crate::row::RowData;
use crate::{MAX_COLS, MAX_ROWS};

/// A worksheet (single sheet in a workbook)
///
/// Cells are stored sparsely in row-major order:
/// `BTreeMap<row_index, BTreeMap<col_index, CellData>>`. A cell that exists in
/// the document is kept even when its value is empty, so that iteration
/// visits exactly the cells the source file declared.
#[derive(Debug, Clone, Default)]
pub struct Worksheet {
    /// Sheet name
    name: String,
    /// Row index → column map
    rows: BTreeMap<u32, BTreeMap<u16, CellData>>,
    /// Merged cell regions, in document order
    merged_regions: Vec<CellRange>,
    /// Hyperlinks, in document order
    hyperlinks: Vec<Hyperlink>,
}

impl Worksheet {
    /// Create a new worksheet with the given name
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Get the sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    // === Cell Access ===

    /// Get a cell by address string (e.g., "A1")
    pub fn cell(&self, address: &str) -> Result<Option<&CellData>> {
        let addr = CellAddress::parse(address)?;
        Ok(self.cell_at(addr.row, addr.col))
    }

    /// Get a cell by row and column indices
    pub fn cell_at(&self, row: u32, col: u16) -> Option<&CellData> {
        self.rows.get(&row).and_then(|r| r.get(&col))
    }

    /// Get cell value (convenience method)
    pub fn get_value(&self, address: &str) -> Result<CellValue> {
        let addr = CellAddress::parse(address)?;
        Ok(self.get_value_at(addr.row, addr.col))
    }

    /// Get cell value by indices
    pub fn get_value_at(&self, row: u32, col: u16) -> CellValue {
        self.cell_at(row, col)
            .map(|c| c.value.clone())
            .unwrap_or(CellValue::Empty)
    }

    // === Cell Modification ===

    /// Set a cell value by address string
    pub fn set_cell_value<V: Into<CellValue>>(&mut self, address: &str, value: V) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_cell_value_at(addr.row, addr.col, value)
    }

    /// Set a cell value by row and column indices, preserving its format
    pub fn set_cell_value_at<V: Into<CellValue>>(
        &mut self,
        row: u32,
        col: u16,
        value: V,
    ) -> Result<()> {
        validate_cell_position(row, col)?;
        self.rows
            .entry(row)
            .or_default()
            .entry(col)
            .or_default()
            .value = value.into();
        Ok(())
    }

    /// Set a cell's display format, creating an empty cell if needed
    pub fn set_number_format_at(
        &mut self,
        row: u32,
        col: u16,
        number_format: NumberFormat,
    ) -> Result<()> {
        validate_cell_position(row, col)?;
        self.rows
            .entry(row)
            .or_default()
            .entry(col)
            .or_default()
            .number_format = number_format;
        Ok(())
    }

    /// Replace a cell's full data
    pub fn set_cell_at(&mut self, row: u32, col: u16, data: CellData) -> Result<()> {
        validate_cell_position(row, col)?;
        self.rows.entry(row).or_default().insert(col, data);
        Ok(())
    }

    // === Iteration ===

    /// Iterate rows in ascending order, each with its cells in ascending
    /// column order
    pub fn rows(&self) -> impl Iterator<Item = RowData<'_>> {
        self.rows.iter().map(|(&index, cols)| {
            RowData::new(index, cols.iter().map(|(&col, data)| (col, data)).collect())
        })
    }

    /// Iterate over all cells as (row, col, data)
    pub fn iter_cells(&self) -> impl Iterator<Item = (u32, u16, &CellData)> {
        self.rows
            .iter()
            .flat_map(|(&row, cols)| cols.iter().map(move |(&col, data)| (row, col, data)))
    }

    /// Get the number of stored cells
    pub fn cell_count(&self) -> usize {
        self.rows.values().map(BTreeMap::len).sum()
    }

    /// Check if the worksheet has no cells
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get the used range (bounds of all stored cells)
    pub fn used_range(&self) -> Option<CellRange> {
        let first_row = *self.rows.keys().next()?;
        let last_row = *self.rows.keys().next_back()?;
        let first_col = self.rows.values().filter_map(|r| r.keys().next()).min()?;
        let last_col = self.rows.values().filter_map(|r| r.keys().next_back()).max()?;
        Some(CellRange::from_indices(
            first_row, *first_col, last_row, *last_col,
        ))
    }

    // === Merged Cells ===

    /// Get merged regions in document order
    pub fn merged_regions(&self) -> &[CellRange] {
        &self.merged_regions
    }

    /// Merge cells, rejecting ranges that overlap an existing region
    pub fn merge_cells(&mut self, range: &CellRange) -> Result<()> {
        if self.merged_regions.iter().any(|existing| range.overlaps(existing)) {
            return Err(Error::MergedCellConflict(range.to_string()));
        }
        self.merged_regions.push(*range);
        Ok(())
    }

    /// Record a merge region exactly as a document declares it.
    ///
    /// Unlike [`Worksheet::merge_cells`] this does not check for overlaps;
    /// readers keep malformed documents intact and leave the resolution to
    /// the renderer.
    pub fn push_merged_region(&mut self, range: CellRange) {
        self.merged_regions.push(range);
    }

    // === Hyperlinks ===

    /// Attach a hyperlink
    pub fn add_hyperlink(&mut self, hyperlink: Hyperlink) {
        self.hyperlinks.push(hyperlink);
    }

    /// All hyperlinks in document order
    pub fn hyperlinks(&self) -> &[Hyperlink] {
        &self.hyperlinks
    }

    /// The first hyperlink whose range covers the cell
    pub fn hyperlink_at(&self, row: u32, col: u16) -> Option<&Hyperlink> {
        self.hyperlinks
            .iter()
            .find(|h| h.range.contains_at(row, col))
    }
}

/// Validate cell position
fn validate_cell_position(row: u32, col: u16) -> Result<()> {
    if row >= MAX_ROWS {
        return Err(Error::RowOutOfBounds(row, MAX_ROWS - 1));
    }
    if col >= MAX_COLS {
        return Err(Error::ColumnOutOfBounds(u32::from(col), MAX_COLS - 1));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_worksheet() {
        let ws = Worksheet::new("Test");
        assert_eq!(ws.name(), "Test");
        assert!(ws.is_empty());
        assert!(ws.used_range().is_none());
    }

    #[test]
    fn test_set_cell_values() {
        let mut ws = Worksheet::new("Test");

        ws.set_cell_value("A1", "Hello").unwrap();
        ws.set_cell_value("B1", 42.0).unwrap();

        assert_eq!(ws.get_value("A1").unwrap().as_string(), Some("Hello"));
        assert_eq!(ws.get_value("B1").unwrap().as_number(), Some(42.0));
        assert_eq!(ws.get_value("Z9").unwrap(), CellValue::Empty);
    }

    #[test]
    fn test_empty_cells_are_kept() {
        let mut ws = Worksheet::new("Test");
        ws.set_number_format_at(0, 2, NumberFormat::date_short())
            .unwrap();

        assert_eq!(ws.cell_count(), 1);
        assert!(ws.cell_at(0, 2).unwrap().value.is_empty());
    }

    #[test]
    fn test_rows_are_sparse_and_ordered() {
        let mut ws = Worksheet::new("Test");
        ws.set_cell_value_at(4, 3, "d").unwrap();
        ws.set_cell_value_at(0, 5, "b").unwrap();
        ws.set_cell_value_at(0, 1, "a").unwrap();

        let rows: Vec<_> = ws.rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].index, 0);
        let cols: Vec<u16> = rows[0].cells.iter().map(|(c, _)| *c).collect();
        assert_eq!(cols, vec![1, 5]);
        assert_eq!(rows[1].index, 4);

        let range = ws.used_range().unwrap();
        assert_eq!(range.to_string(), "B1:F5");
    }

    #[test]
    fn test_merge_cells() {
        let mut ws = Worksheet::new("Test");

        ws.merge_cells(&CellRange::parse("A1:C3").unwrap()).unwrap();
        assert_eq!(ws.merged_regions().len(), 1);

        // Can't merge overlapping through the editing API
        assert!(ws.merge_cells(&CellRange::parse("B2:D4").unwrap()).is_err());

        // A reader may still record it
        ws.push_merged_region(CellRange::parse("B2:D4").unwrap());
        assert_eq!(ws.merged_regions().len(), 2);
    }

    #[test]
    fn test_hyperlink_lookup() {
        let mut ws = Worksheet::new("Test");
        ws.add_hyperlink(Hyperlink::external(
            CellRange::parse("B2:C3").unwrap(),
            "https://example.com",
        ));

        assert!(ws.hyperlink_at(2, 2).is_some());
        assert!(ws.hyperlink_at(0, 0).is_none());
    }

    #[test]
    fn test_out_of_bounds() {
        let mut ws = Worksheet::new("Test");
        assert!(ws.set_cell_value_at(MAX_ROWS, 0, 1.0).is_err());
        assert!(ws.set_cell_value_at(0, MAX_COLS, 1.0).is_err());
    }
}
