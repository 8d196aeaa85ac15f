//! Merge-region lookup
//!
//! For every cell coordinate a sheet renders, [`MergeIndex::placement_of`]
//! decides whether the cell emits a `<td>` and with which spans. A cell
//! outside every region is an origin with spans of 1. Inside a region only
//! the top-left cell is an origin; it spans the whole region.
//!
//! Span eligibility is decided per axis: `row_span` is set on the region's
//! first row and `col_span` on its first column. A cell on the first row but
//! not the first column therefore gets a row span and a zero column span,
//! which still makes it a non-origin.

use sheet2html_core::CellRange;

/// Where a cell sits relative to the merge regions of its sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellPlacement {
    /// Rows covered by the cell's markup, 0 when not on a region's first row
    pub row_span: u32,
    /// Columns covered by the cell's markup, 0 when not on a region's first column
    pub col_span: u32,
}

impl CellPlacement {
    /// A cell covered by no merge region
    pub const UNMERGED: Self = Self {
        row_span: 1,
        col_span: 1,
    };

    /// A cell absorbed by a region it is not the origin of
    pub const SUPPRESSED: Self = Self {
        row_span: 0,
        col_span: 0,
    };

    /// Whether the cell emits markup
    pub fn is_origin(&self) -> bool {
        self.row_span > 0 && self.col_span > 0
    }
}

/// Merge regions of one sheet, queried per cell
#[derive(Debug, Clone, Copy)]
pub struct MergeIndex<'a> {
    regions: &'a [CellRange],
}

impl<'a> MergeIndex<'a> {
    /// Build the index over a sheet's merge regions, in document order
    pub fn new(regions: &'a [CellRange]) -> Self {
        Self { regions }
    }

    /// Number of regions
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// True when the sheet has no merge regions
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// The region that decides a coordinate's placement.
    ///
    /// Well-formed sheets have disjoint regions. When regions overlap, the
    /// first one in document order that contains the coordinate wins.
    pub fn region_at(&self, row: u32, col: u16) -> Option<&'a CellRange> {
        self.regions.iter().find(|r| r.contains_at(row, col))
    }

    /// Placement of the cell at (row, col)
    pub fn placement_of(&self, row: u32, col: u16) -> CellPlacement {
        match self.region_at(row, col) {
            None => CellPlacement::UNMERGED,
            Some(region) => CellPlacement {
                row_span: if row == region.start.row {
                    region.row_count()
                } else {
                    0
                },
                col_span: if col == region.start.col {
                    region.col_count()
                } else {
                    0
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(s: &str) -> CellRange {
        CellRange::parse(s).unwrap()
    }

    #[test]
    fn test_unmerged_default() {
        let index = MergeIndex::new(&[]);
        assert!(index.is_empty());
        assert_eq!(index.placement_of(0, 0), CellPlacement::UNMERGED);
        assert!(CellPlacement::UNMERGED.is_origin());
        assert!(!CellPlacement::SUPPRESSED.is_origin());
    }

    #[test]
    fn test_origin_spans() {
        let regions = [range("B2:D3")];
        let index = MergeIndex::new(&regions);

        assert_eq!(
            index.placement_of(1, 1),
            CellPlacement {
                row_span: 2,
                col_span: 3
            }
        );
        assert_eq!(index.placement_of(0, 0), CellPlacement::UNMERGED);
        assert_eq!(index.placement_of(3, 1), CellPlacement::UNMERGED);
    }

    #[test]
    fn test_asymmetric_spans() {
        let regions = [range("B2:D3")];
        let index = MergeIndex::new(&regions);

        // First row, later column
        let top = index.placement_of(1, 2);
        assert_eq!(
            top,
            CellPlacement {
                row_span: 2,
                col_span: 0
            }
        );
        assert!(!top.is_origin());

        // First column, later row
        let left = index.placement_of(2, 1);
        assert_eq!(
            left,
            CellPlacement {
                row_span: 0,
                col_span: 3
            }
        );
        assert!(!left.is_origin());

        assert_eq!(index.placement_of(2, 3), CellPlacement::SUPPRESSED);
    }

    #[test]
    fn test_overlap_first_region_wins() {
        let regions = [range("A1:B2"), range("B2:C3")];
        let index = MergeIndex::new(&regions);

        // B2 is inside both; A1:B2 comes first, so B2 is suppressed
        assert_eq!(index.region_at(1, 1), Some(&regions[0]));
        assert_eq!(index.placement_of(1, 1), CellPlacement::SUPPRESSED);

        // C3 only belongs to the second region
        assert_eq!(index.placement_of(2, 2), CellPlacement::SUPPRESSED);
        assert_eq!(
            index.placement_of(1, 2),
            CellPlacement {
                row_span: 2,
                col_span: 0
            }
        );
    }

    #[test]
    fn test_single_cell_region() {
        let regions = [range("C3")];
        let index = MergeIndex::new(&regions);
        assert_eq!(index.placement_of(2, 2), CellPlacement::UNMERGED);
    }
}
