//! XLSX reader

mod rels;
mod worksheet;

use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::error::{XlsxError, XlsxResult};
use crate::styles::{read_styles_xml, CellFormats};
use rels::{read_relationships, rels_path_for, resolve_workbook_target, Relationships};
use sheet2html_core::{Hyperlink, HyperlinkTarget, Workbook, Worksheet};
use worksheet::{read_worksheet_xml, RawHyperlink, SheetContext};

/// Signature of the OLE2 compound file container used by legacy `.xls`
const OLE2_SIGNATURE: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// Decode Excel's `_xHHHH_` escape sequences in strings.
///
/// Excel uses this format to encode characters that XML cannot carry
/// directly, e.g. `_x000d_` for CR and `_x005f_` for a literal underscore.
fn decode_excel_escapes(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(pos) = rest.find("_x") {
        result.push_str(&rest[..pos]);
        let candidate = &rest[pos..];

        let decoded = candidate
            .get(2..6)
            .filter(|hex| hex.bytes().all(|b| b.is_ascii_hexdigit()))
            .filter(|_| candidate.as_bytes().get(6) == Some(&b'_'))
            .and_then(|hex| u32::from_str_radix(hex, 16).ok())
            .and_then(char::from_u32);

        match decoded {
            Some(c) => {
                result.push(c);
                rest = &candidate[7..];
            }
            None => {
                result.push('_');
                rest = &candidate[1..];
            }
        }
    }

    result.push_str(rest);
    result
}

/// A `<sheet>` entry of workbook.xml
#[derive(Debug, Clone)]
struct SheetEntry {
    name: String,
    rel_id: String,
}

/// What workbook.xml tells us
#[derive(Debug, Default)]
struct WorkbookPart {
    sheets: Vec<SheetEntry>,
    date_1904: bool,
}

/// XLSX file reader
pub struct XlsxReader;

impl XlsxReader {
    /// Read a workbook from a file path
    pub fn read_file<P: AsRef<Path>>(path: P) -> XlsxResult<Workbook> {
        let path = path.as_ref();
        log::debug!("reading workbook {}", path.display());
        let file = File::open(path)?;
        Self::read(BufReader::new(file))
    }

    /// Read a workbook from a reader
    pub fn read<R: Read + Seek>(mut reader: R) -> XlsxResult<Workbook> {
        if Self::is_legacy_container(&mut reader)? {
            return Err(XlsxError::UnsupportedFormat(
                "legacy binary .xls workbooks are not supported; save as .xlsx".into(),
            ));
        }

        let mut archive = zip::ZipArchive::new(reader)?;

        // Verify this is an XLSX file
        if archive.by_name("[Content_Types].xml").is_err() {
            return Err(XlsxError::InvalidFormat(
                "Missing [Content_Types].xml".into(),
            ));
        }

        let shared_strings = Self::read_shared_strings(&mut archive)?;
        let formats = Self::read_styles(&mut archive)?;
        let workbook_part = Self::read_workbook_xml(&mut archive)?;

        let workbook_rels = read_relationships(&mut archive, "xl/_rels/workbook.xml.rels")?
            .ok_or_else(|| XlsxError::MissingPart("xl/_rels/workbook.xml.rels".into()))?;

        let mut workbook = Workbook::empty();
        workbook.settings_mut().date_1904 = workbook_part.date_1904;

        let ctx = SheetContext {
            shared_strings: &shared_strings,
            formats: &formats,
            date_1904: workbook_part.date_1904,
        };

        for entry in &workbook_part.sheets {
            let path = match workbook_rels.get(&entry.rel_id) {
                Some(rel) if rel.is_worksheet() => resolve_workbook_target(&rel.target),
                // Chartsheets and dialog sheets have no cell grid
                Some(_) => {
                    log::debug!("skipping non-worksheet sheet '{}'", entry.name);
                    continue;
                }
                None => {
                    log::warn!(
                        "sheet '{}' refers to unknown relationship {}",
                        entry.name,
                        entry.rel_id
                    );
                    continue;
                }
            };

            let worksheet = Self::read_worksheet(&mut archive, &path, &entry.name, &ctx)?;
            log::debug!(
                "read sheet '{}': {} cells, {} merge regions, {} hyperlinks",
                worksheet.name(),
                worksheet.cell_count(),
                worksheet.merged_regions().len(),
                worksheet.hyperlinks().len()
            );
            workbook.add_existing_worksheet(worksheet)?;
        }

        // Ensure at least one sheet exists
        if workbook.is_empty() {
            workbook.add_worksheet()?;
        }

        Ok(workbook)
    }

    /// Check for the OLE2 signature, leaving the reader where it started
    fn is_legacy_container<R: Read + Seek>(reader: &mut R) -> XlsxResult<bool> {
        let start = reader.stream_position()?;
        let mut signature = [0u8; 8];
        let mut filled = 0;
        while filled < signature.len() {
            match reader.read(&mut signature[filled..])? {
                0 => break,
                n => filled += n,
            }
        }
        reader.seek(SeekFrom::Start(start))?;
        Ok(filled == signature.len() && signature == OLE2_SIGNATURE)
    }

    /// Read the shared strings table
    fn read_shared_strings<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<Vec<String>> {
        let mut strings = Vec::new();

        let file = match archive.by_name("xl/sharedStrings.xml") {
            Ok(f) => f,
            Err(_) => return Ok(strings), // No shared strings is valid
        };

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        // Leading and trailing spaces of <t xml:space="preserve"> matter
        xml_reader.trim_text(false);

        let mut buf = Vec::new();
        let mut current_string = String::new();
        let mut in_si = false;
        let mut in_t = false;
        let mut in_phonetic = false;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.local_name().as_ref() {
                    b"si" => {
                        in_si = true;
                        current_string.clear();
                    }
                    b"rPh" if in_si => in_phonetic = true,
                    b"t" if in_si && !in_phonetic => in_t = true,
                    _ => {}
                },
                Ok(Event::Empty(e)) if e.local_name().as_ref() == b"si" => {
                    strings.push(String::new());
                }
                Ok(Event::End(e)) => match e.local_name().as_ref() {
                    b"si" => {
                        strings.push(decode_excel_escapes(&current_string));
                        current_string.clear();
                        in_si = false;
                    }
                    b"rPh" => in_phonetic = false,
                    b"t" => in_t = false,
                    _ => {}
                },
                Ok(Event::Text(e)) if in_t => {
                    current_string.push_str(&e.unescape()?);
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(strings)
    }

    fn read_styles<R: Read + Seek>(archive: &mut zip::ZipArchive<R>) -> XlsxResult<CellFormats> {
        match archive.by_name("xl/styles.xml") {
            Ok(file) => read_styles_xml(file),
            Err(_) => Ok(CellFormats::default()),
        }
    }

    /// Read workbook.xml to get sheet names, rIds and the date system
    fn read_workbook_xml<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<WorkbookPart> {
        let file = archive
            .by_name("xl/workbook.xml")
            .map_err(|_| XlsxError::MissingPart("xl/workbook.xml".into()))?;

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut part = WorkbookPart::default();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e)) => match e.local_name().as_ref() {
                    b"workbookPr" => {
                        part.date_1904 = e
                            .attributes()
                            .flatten()
                            .find(|attr| attr.key.as_ref() == b"date1904")
                            .and_then(|attr| attr.unescape_value().ok())
                            .map_or(false, |v| v.as_ref() == "1" || v.as_ref() == "true");
                    }
                    b"sheet" => {
                        let mut name = None;
                        let mut rel_id = None;

                        for attr in e.attributes().flatten() {
                            match attr.key.as_ref() {
                                b"name" => {
                                    name = attr.unescape_value().ok().map(|s| s.to_string());
                                }
                                b"r:id" => {
                                    rel_id = attr.unescape_value().ok().map(|s| s.to_string());
                                }
                                _ => {}
                            }
                        }

                        if let (Some(name), Some(rel_id)) = (name, rel_id) {
                            part.sheets.push(SheetEntry { name, rel_id });
                        }
                    }
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(part)
    }

    /// Read a worksheet and resolve its hyperlinks
    fn read_worksheet<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
        path: &str,
        name: &str,
        ctx: &SheetContext<'_>,
    ) -> XlsxResult<Worksheet> {
        let mut worksheet = Worksheet::new(name);

        let raw_links = {
            let file = archive
                .by_name(path)
                .map_err(|_| XlsxError::MissingPart(path.to_string()))?;
            read_worksheet_xml(file, &mut worksheet, ctx)?
        };

        if !raw_links.is_empty() {
            let sheet_rels = read_relationships(archive, &rels_path_for(path))?.unwrap_or_default();
            for raw in raw_links {
                match resolve_hyperlink(raw, &sheet_rels) {
                    Some(link) => worksheet.add_hyperlink(link),
                    None => log::warn!("sheet '{}': skipping hyperlink without target", name),
                }
            }
        }

        Ok(worksheet)
    }
}

/// Turn a `<hyperlink>` into a [`Hyperlink`] using the sheet's relationships
fn resolve_hyperlink(raw: RawHyperlink, rels: &Relationships) -> Option<Hyperlink> {
    let external = raw
        .rel_id
        .as_ref()
        .and_then(|id| rels.get(id))
        .filter(|rel| rel.is_hyperlink() || rel.external)
        .map(|rel| match &raw.location {
            Some(location) => format!("{}#{}", rel.target, location),
            None => rel.target.clone(),
        });

    let target = match (external, raw.location) {
        (Some(url), _) => HyperlinkTarget::External(url),
        (None, Some(location)) => HyperlinkTarget::Internal(location),
        (None, None) => return None,
    };

    Some(Hyperlink {
        range: raw.range,
        target,
        tooltip: raw.tooltip,
    })
}
