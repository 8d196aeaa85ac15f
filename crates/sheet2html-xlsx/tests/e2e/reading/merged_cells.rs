//! Tests for reading merge regions.

use std::io::Cursor;

use crate::XlsxFixture;
use sheet2html_core::CellRange;
use sheet2html_xlsx::XlsxReader;

#[test]
fn test_merged_regions_present() {
    let bytes = XlsxFixture::new()
        .sheet(
            "Merged",
            r#"<sheetData>
<row r="1"><c r="A1"><v>1</v></c><c r="B1"/><c r="C1"><v>3</v></c></row>
<row r="2"><c r="A2"/><c r="B2"/><c r="C2"><v>6</v></c></row>
</sheetData>
<mergeCells count="2"><mergeCell ref="A1:B2"/><mergeCell ref="C1:C2"/></mergeCells>"#,
        )
        .build();

    let wb = XlsxReader::read(Cursor::new(bytes)).unwrap();
    let sheet = wb.worksheet(0).unwrap();

    assert_eq!(
        sheet.merged_regions(),
        &[
            CellRange::parse("A1:B2").unwrap(),
            CellRange::parse("C1:C2").unwrap()
        ]
    );

    // Covered cells that exist in the file are kept as blank cells
    assert!(sheet.cell_at(1, 1).unwrap().value.is_empty());
}

#[test]
fn test_invalid_merge_ref_is_skipped() {
    let bytes = XlsxFixture::new()
        .sheet(
            "Merged",
            r#"<sheetData/><mergeCells count="2"><mergeCell ref="A1:"/><mergeCell ref="D4:E5"/></mergeCells>"#,
        )
        .build();

    let wb = XlsxReader::read(Cursor::new(bytes)).unwrap();
    let regions = wb.worksheet(0).unwrap().merged_regions();

    assert_eq!(regions.len(), 1);
    assert_eq!(regions[0].to_string(), "D4:E5");
}

#[test]
fn test_overlapping_regions_are_not_rejected() {
    let bytes = XlsxFixture::new()
        .sheet(
            "Merged",
            r#"<sheetData/><mergeCells count="2"><mergeCell ref="A1:B2"/><mergeCell ref="B2:C3"/></mergeCells>"#,
        )
        .build();

    let wb = XlsxReader::read(Cursor::new(bytes)).unwrap();
    assert_eq!(wb.worksheet(0).unwrap().merged_regions().len(), 2);
}
