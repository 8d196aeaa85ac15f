//! Tests for workbook-level structure: sheet order, names, file access.

use std::io::Cursor;

use crate::XlsxFixture;
use sheet2html_xlsx::{XlsxError, XlsxReader};

#[test]
fn test_sheet_order_and_names() {
    let bytes = XlsxFixture::new()
        .sheet("Summary", "<sheetData/>")
        .sheet("Q1 & Q2", "<sheetData/>")
        .sheet("Notes", "<sheetData/>")
        .build();

    let wb = XlsxReader::read(Cursor::new(bytes)).unwrap();
    let names: Vec<&str> = wb.worksheets().map(|ws| ws.name()).collect();
    assert_eq!(names, vec!["Summary", "Q1 & Q2", "Notes"]);
}

#[test]
fn test_read_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("book.xlsx");
    XlsxFixture::new()
        .sheet(
            "Data",
            r#"<sheetData><row r="3"><c r="C3"><v>9</v></c></row></sheetData>"#,
        )
        .write_to(&path);

    let wb = XlsxReader::read_file(&path).unwrap();
    let sheet = wb.worksheet(0).unwrap();
    assert_eq!(sheet.get_value("C3").unwrap().as_number(), Some(9.0));
    assert_eq!(sheet.used_range().unwrap().to_string(), "C3");
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = XlsxReader::read_file(dir.path().join("absent.xlsx")).unwrap_err();
    assert!(matches!(err, XlsxError::Io(_)));
}

#[test]
fn test_missing_workbook_part() {
    use std::io::Write;

    let mut buf = Vec::new();
    {
        let mut zip = zip::ZipWriter::new(Cursor::new(&mut buf));
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("[Content_Types].xml", options).unwrap();
        zip.write_all(b"<Types/>").unwrap();
        zip.finish().unwrap();
    }

    let err = XlsxReader::read(Cursor::new(buf)).unwrap_err();
    assert!(matches!(err, XlsxError::MissingPart(_)));
}

#[test]
fn test_truncated_package() {
    let mut bytes = XlsxFixture::new().sheet("Data", "<sheetData/>").build();
    bytes.truncate(bytes.len() / 2);
    assert!(XlsxReader::read(Cursor::new(bytes)).is_err());
}
