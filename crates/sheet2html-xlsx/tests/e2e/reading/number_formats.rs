//! Tests for resolving number formats and date cells.

use std::io::Cursor;

use crate::XlsxFixture;
use sheet2html_core::date::serial_to_datetime;
use sheet2html_core::NumberFormat;
use sheet2html_xlsx::XlsxReader;

fn fixture() -> XlsxFixture {
    XlsxFixture::new()
        .styles(
            r#"<numFmt numFmtId="164" formatCode="yyyy\-mm\-dd\ hh:mm"/><numFmt numFmtId="165" formatCode="0.000%"/>"#,
            r#"<xf numFmtId="0"/><xf numFmtId="14"/><xf numFmtId="164"/><xf numFmtId="165"/><xf numFmtId="4"/>"#,
        )
        .sheet(
            "Formats",
            r#"<sheetData><row r="1">
<c r="A1" s="1"><v>45306</v></c>
<c r="B1" s="2"><v>45306.395833333336</v></c>
<c r="C1" s="3"><v>0.5</v></c>
<c r="D1" s="4"><v>1234.5</v></c>
<c r="E1"><v>7</v></c>
</row></sheetData>"#,
        )
}

#[test]
fn test_formats_resolved_per_cell() {
    let wb = XlsxReader::read(Cursor::new(fixture().build())).unwrap();
    let sheet = wb.worksheet(0).unwrap();

    assert_eq!(sheet.cell_at(0, 0).unwrap().number_format, NumberFormat::BuiltIn(14));
    assert_eq!(
        sheet.cell_at(0, 1).unwrap().number_format,
        NumberFormat::Custom(r"yyyy\-mm\-dd\ hh:mm".into())
    );
    assert_eq!(sheet.cell_at(0, 4).unwrap().number_format, NumberFormat::General);
}

#[test]
fn test_date_cells_detected() {
    let wb = XlsxReader::read(Cursor::new(fixture().build())).unwrap();
    let sheet = wb.worksheet(0).unwrap();

    let flags: Vec<bool> = (0..5)
        .map(|col| sheet.cell_at(0, col).unwrap().is_date_formatted())
        .collect();
    assert_eq!(flags, vec![true, true, false, false, false]);

    let serial = sheet.get_value_at(0, 1).as_number().unwrap();
    let dt = serial_to_datetime(serial, wb.settings().date_1904).unwrap();
    assert_eq!(dt.format("%Y-%m-%d %H:%M:%S").to_string(), "2024-01-15 09:30:00");
}

#[test]
fn test_1904_date_system() {
    let wb = XlsxReader::read(Cursor::new(fixture().date_1904().build())).unwrap();
    assert!(wb.settings().date_1904);

    let serial = wb.worksheet(0).unwrap().get_value_at(0, 0).as_number().unwrap();
    let dt = serial_to_datetime(serial, true).unwrap();
    assert_eq!(dt.format("%Y-%m-%d").to_string(), "2028-01-16");
}
