//! Relationship parts (`*.rels`)

use std::collections::HashMap;
use std::io::{BufReader, Read, Seek};

use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::error::{XlsxError, XlsxResult};

const WORKSHEET_REL_SUFFIX: &str = "/worksheet";
const HYPERLINK_REL_SUFFIX: &str = "/hyperlink";

/// One `Relationship` entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Relationship {
    pub target: String,
    pub rel_type: String,
    pub external: bool,
}

impl Relationship {
    pub(crate) fn is_worksheet(&self) -> bool {
        self.rel_type.ends_with(WORKSHEET_REL_SUFFIX)
    }

    pub(crate) fn is_hyperlink(&self) -> bool {
        self.rel_type.ends_with(HYPERLINK_REL_SUFFIX)
    }
}

/// Relationships of a part, keyed by `Id`
pub(crate) type Relationships = HashMap<String, Relationship>;

/// Read a relationship part; a missing part yields `None`
pub(crate) fn read_relationships<R: Read + Seek>(
    archive: &mut zip::ZipArchive<R>,
    path: &str,
) -> XlsxResult<Option<Relationships>> {
    let file = match archive.by_name(path) {
        Ok(f) => f,
        Err(_) => return Ok(None),
    };

    let mut xml_reader = Reader::from_reader(BufReader::new(file));
    xml_reader.trim_text(true);

    let mut buf = Vec::new();
    let mut rels = HashMap::new();

    loop {
        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Empty(e)) | Ok(Event::Start(e))
                if e.local_name().as_ref() == b"Relationship" =>
            {
                let mut id = None;
                let mut target = None;
                let mut rel_type = None;
                let mut external = false;

                for attr in e.attributes().flatten() {
                    match attr.key.as_ref() {
                        b"Id" => id = attr.unescape_value().ok().map(|s| s.to_string()),
                        b"Target" => target = attr.unescape_value().ok().map(|s| s.to_string()),
                        b"Type" => rel_type = attr.unescape_value().ok().map(|s| s.to_string()),
                        b"TargetMode" => {
                            external = attr
                                .unescape_value()
                                .map_or(false, |s| s.as_ref() == "External");
                        }
                        _ => {}
                    }
                }

                if let (Some(id), Some(target), Some(rel_type)) = (id, target, rel_type) {
                    rels.insert(
                        id,
                        Relationship {
                            target,
                            rel_type,
                            external,
                        },
                    );
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(XlsxError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(Some(rels))
}

/// Resolve a workbook-relative target to an archive path
///
/// Targets are relative to `xl/` unless they are absolute package paths.
pub(crate) fn resolve_workbook_target(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("xl/{}", target),
    }
}

/// The relationship part path belonging to a part
/// (`xl/worksheets/sheet1.xml` → `xl/worksheets/_rels/sheet1.xml.rels`)
pub(crate) fn rels_path_for(part_path: &str) -> String {
    match part_path.rsplit_once('/') {
        Some((dir, file)) => format!("{}/_rels/{}.rels", dir, file),
        None => format!("_rels/{}.rels", part_path),
    }
}
