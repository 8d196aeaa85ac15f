//! Tests for reading hyperlinks.

use std::io::Cursor;

use crate::XlsxFixture;
use sheet2html_core::HyperlinkTarget;
use sheet2html_xlsx::XlsxReader;

const HYPERLINK_REL: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink";

#[test]
fn test_external_and_internal_links() {
    let bytes = XlsxFixture::new()
        .shared_strings(&["site", "jump"])
        .sheet(
            "Links",
            r#"<sheetData>
<row r="1"><c r="A1" t="s"><v>0</v></c><c r="B1" t="s"><v>1</v></c></row>
</sheetData>
<hyperlinks>
  <hyperlink ref="A1" r:id="rId1" tooltip="Visit"/>
  <hyperlink ref="B1" location="'Other Sheet'!A1" display="jump"/>
</hyperlinks>"#,
        )
        .sheet_rels(
            0,
            &format!(
                r#"<Relationship Id="rId1" Type="{HYPERLINK_REL}" Target="https://example.com/?a=1&amp;b=2" TargetMode="External"/>"#
            ),
        )
        .build();

    let wb = XlsxReader::read(Cursor::new(bytes)).unwrap();
    let sheet = wb.worksheet(0).unwrap();

    let external = sheet.hyperlink_at(0, 0).unwrap();
    assert_eq!(
        external.target,
        HyperlinkTarget::External("https://example.com/?a=1&b=2".into())
    );
    assert_eq!(external.tooltip.as_deref(), Some("Visit"));

    let internal = sheet.hyperlink_at(0, 1).unwrap();
    assert_eq!(internal.address(), "#'Other Sheet'!A1");
}

#[test]
fn test_link_without_target_is_skipped() {
    let bytes = XlsxFixture::new()
        .sheet(
            "Links",
            r#"<sheetData/><hyperlinks><hyperlink ref="A1" r:id="rId7"/><hyperlink ref="C3:D4" location="A1"/></hyperlinks>"#,
        )
        .build();

    let wb = XlsxReader::read(Cursor::new(bytes)).unwrap();
    let sheet = wb.worksheet(0).unwrap();

    assert_eq!(sheet.hyperlinks().len(), 1);
    assert!(sheet.hyperlink_at(0, 0).is_none());
    assert!(sheet.hyperlink_at(3, 3).is_some());
}
