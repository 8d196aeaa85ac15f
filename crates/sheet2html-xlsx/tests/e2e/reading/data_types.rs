//! Tests for reading cell values of each type.

use std::io::Cursor;

use crate::XlsxFixture;
use pretty_assertions::assert_eq;
use sheet2html_core::{CellError, CellValue};
use sheet2html_xlsx::XlsxReader;

fn fixture() -> XlsxFixture {
    XlsxFixture::new()
        .shared_strings(&["Name", "Ünïcödé & <tags>", "line1_x000d__x000a_line2"])
        .sheet(
            "Types",
            r#"<sheetData>
<row r="1">
  <c r="A1" t="s"><v>0</v></c>
  <c r="B1" t="s"><v>1</v></c>
  <c r="C1" t="s"><v>2</v></c>
</row>
<row r="2">
  <c r="A2"><v>42</v></c>
  <c r="B2"><v>-3.25</v></c>
  <c r="C2"><v>1E-3</v></c>
</row>
<row r="3">
  <c r="A3" t="b"><v>0</v></c>
  <c r="B3" t="e"><v>#N/A</v></c>
  <c r="C3"><f>A2*2</f><v>84</v></c>
</row>
</sheetData>"#,
        )
}

#[test]
fn test_strings() {
    let wb = XlsxReader::read(Cursor::new(fixture().build())).unwrap();
    let sheet = wb.worksheet(0).unwrap();

    assert_eq!(sheet.get_value("A1").unwrap().as_string(), Some("Name"));
    assert_eq!(
        sheet.get_value("B1").unwrap().as_string(),
        Some("Ünïcödé & <tags>")
    );
    assert_eq!(
        sheet.get_value("C1").unwrap().as_string(),
        Some("line1\r\nline2")
    );
}

#[test]
fn test_numbers() {
    let wb = XlsxReader::read(Cursor::new(fixture().build())).unwrap();
    let sheet = wb.worksheet(0).unwrap();

    assert_eq!(sheet.get_value("A2").unwrap(), CellValue::Number(42.0));
    assert_eq!(sheet.get_value("B2").unwrap(), CellValue::Number(-3.25));
    assert_eq!(sheet.get_value("C2").unwrap(), CellValue::Number(0.001));
}

#[test]
fn test_booleans_errors_and_formulas() {
    let wb = XlsxReader::read(Cursor::new(fixture().build())).unwrap();
    let sheet = wb.worksheet(0).unwrap();

    assert_eq!(sheet.get_value("A3").unwrap(), CellValue::Boolean(false));
    assert_eq!(
        sheet.get_value("B3").unwrap(),
        CellValue::Error(CellError::Na)
    );

    let formula = sheet.get_value("C3").unwrap();
    assert_eq!(formula.formula_text(), Some("=A2*2"));
    assert_eq!(formula.as_number(), Some(84.0));
}

#[test]
fn test_rich_text_shared_string() {
    let body = r#"<sheetData><row r="1"><c r="A1" t="s"><v>0</v></c></row></sheetData>"#;
    let mut bytes = XlsxFixture::new().sheet("Rich", body).build();

    // Replace the plain table with one holding formatted runs and a phonetic hint
    bytes = rewrite_part(
        &bytes,
        "xl/sharedStrings.xml",
        r#"<?xml version="1.0"?><sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><si><r><rPr><b/></rPr><t>Bold</t></r><r><t xml:space="preserve"> and plain</t></r><rPh sb="0" eb="1"><t>ボールド</t></rPh></si></sst>"#,
    );

    let wb = XlsxReader::read(Cursor::new(bytes)).unwrap();
    assert_eq!(
        wb.worksheet(0).unwrap().get_value("A1").unwrap().as_string(),
        Some("Bold and plain")
    );
}

/// Copy a package, replacing (or adding) one part
fn rewrite_part(bytes: &[u8], part: &str, content: &str) -> Vec<u8> {
    use std::io::{Read, Write};

    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut out = Vec::new();
    {
        let mut zip = zip::ZipWriter::new(Cursor::new(&mut out));
        let options = zip::write::SimpleFileOptions::default();
        for i in 0..archive.len() {
            let mut file = archive.by_index(i).unwrap();
            let name = file.name().to_string();
            if name == part {
                continue;
            }
            let mut data = Vec::new();
            file.read_to_end(&mut data).unwrap();
            zip.start_file(name.as_str(), options).unwrap();
            zip.write_all(&data).unwrap();
        }
        zip.start_file(part, options).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
        zip.finish().unwrap();
    }
    out
}
