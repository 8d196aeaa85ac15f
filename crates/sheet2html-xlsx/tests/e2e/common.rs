//! In-memory workbook fixtures shared by the reader and converter tests.

use std::collections::BTreeMap;
use std::io::{Cursor, Write};
use std::path::Path;

use quick_xml::escape::escape;
use zip::write::SimpleFileOptions;

const MAIN_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const REL_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const PKG_REL_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

/// Builder for small in-memory `.xlsx` packages.
///
/// Sheet bodies are the XML that goes inside `<worksheet>`, typically a
/// `<sheetData>` element followed by `<mergeCells>` or `<hyperlinks>`.
#[derive(Debug, Default, Clone)]
pub struct XlsxFixture {
    sheets: Vec<(String, String)>,
    shared_strings: Vec<String>,
    cell_xfs: Option<String>,
    num_fmts: Option<String>,
    sheet_rels: BTreeMap<usize, String>,
    date_1904: bool,
}

#[allow(dead_code)]
impl XlsxFixture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a worksheet
    pub fn sheet(mut self, name: &str, body: &str) -> Self {
        self.sheets.push((name.to_string(), body.to_string()));
        self
    }

    /// Set the shared string table
    pub fn shared_strings(mut self, strings: &[&str]) -> Self {
        self.shared_strings = strings.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Set styles.xml content: `<numFmt>` entries and `<xf>` entries
    pub fn styles(mut self, num_fmts: &str, cell_xfs: &str) -> Self {
        self.num_fmts = Some(num_fmts.to_string());
        self.cell_xfs = Some(cell_xfs.to_string());
        self
    }

    /// Set the `<Relationship>` entries of a sheet's relationship part
    pub fn sheet_rels(mut self, sheet_index: usize, relationships: &str) -> Self {
        self.sheet_rels.insert(sheet_index, relationships.to_string());
        self
    }

    /// Use the 1904 date system
    pub fn date_1904(mut self) -> Self {
        self.date_1904 = true;
        self
    }

    /// Build the package bytes
    pub fn build(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        {
            let mut zip = zip::ZipWriter::new(Cursor::new(&mut buf));
            let options = SimpleFileOptions::default();
            let mut put = |path: &str, content: String| {
                zip.start_file(path, options).unwrap();
                zip.write_all(content.as_bytes()).unwrap();
            };

            put(
                "[Content_Types].xml",
                r#"<?xml version="1.0" encoding="UTF-8"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/></Types>"#.to_string(),
            );

            put(
                "_rels/.rels",
                format!(
                    r#"<?xml version="1.0" encoding="UTF-8"?><Relationships xmlns="{PKG_REL_NS}"><Relationship Id="rId1" Type="{REL_NS}/officeDocument" Target="xl/workbook.xml"/></Relationships>"#
                ),
            );

            let sheets: String = self
                .sheets
                .iter()
                .enumerate()
                .map(|(i, (name, _))| {
                    format!(
                        r#"<sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
                        escape(name.as_str()),
                        i + 1,
                        i + 1
                    )
                })
                .collect();
            let workbook_pr = if self.date_1904 {
                r#"<workbookPr date1904="1"/>"#
            } else {
                ""
            };
            put(
                "xl/workbook.xml",
                format!(
                    r#"<?xml version="1.0" encoding="UTF-8"?><workbook xmlns="{MAIN_NS}" xmlns:r="{REL_NS}">{workbook_pr}<sheets>{sheets}</sheets></workbook>"#
                ),
            );

            let rels: String = (0..self.sheets.len())
                .map(|i| {
                    format!(
                        r#"<Relationship Id="rId{}" Type="{REL_NS}/worksheet" Target="worksheets/sheet{}.xml"/>"#,
                        i + 1,
                        i + 1
                    )
                })
                .collect();
            put(
                "xl/_rels/workbook.xml.rels",
                format!(
                    r#"<?xml version="1.0" encoding="UTF-8"?><Relationships xmlns="{PKG_REL_NS}">{rels}</Relationships>"#
                ),
            );

            if !self.shared_strings.is_empty() {
                let items: String = self
                    .shared_strings
                    .iter()
                    .map(|s| format!(r#"<si><t xml:space="preserve">{}</t></si>"#, escape(s.as_str())))
                    .collect();
                put(
                    "xl/sharedStrings.xml",
                    format!(
                        r#"<?xml version="1.0" encoding="UTF-8"?><sst xmlns="{MAIN_NS}" count="{n}" uniqueCount="{n}">{items}</sst>"#,
                        n = self.shared_strings.len()
                    ),
                );
            }

            if let Some(cell_xfs) = &self.cell_xfs {
                let num_fmts = self.num_fmts.as_deref().unwrap_or("");
                put(
                    "xl/styles.xml",
                    format!(
                        r#"<?xml version="1.0" encoding="UTF-8"?><styleSheet xmlns="{MAIN_NS}"><numFmts>{num_fmts}</numFmts><cellXfs>{cell_xfs}</cellXfs></styleSheet>"#
                    ),
                );
            }

            for (i, (_, body)) in self.sheets.iter().enumerate() {
                put(
                    &format!("xl/worksheets/sheet{}.xml", i + 1),
                    format!(
                        r#"<?xml version="1.0" encoding="UTF-8"?><worksheet xmlns="{MAIN_NS}" xmlns:r="{REL_NS}">{body}</worksheet>"#
                    ),
                );
            }

            for (i, relationships) in &self.sheet_rels {
                put(
                    &format!("xl/worksheets/_rels/sheet{}.xml.rels", i + 1),
                    format!(
                        r#"<?xml version="1.0" encoding="UTF-8"?><Relationships xmlns="{PKG_REL_NS}">{relationships}</Relationships>"#
                    ),
                );
            }

            zip.finish().unwrap();
        }
        buf
    }

    /// Write the package to a file
    pub fn write_to(&self, path: &Path) {
        std::fs::write(path, self.build()).unwrap();
    }
}
