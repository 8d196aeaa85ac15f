//! XLSX styles (styles.xml) reader
//!
//! Only number formats matter for rendering: each `cellXfs/xf` entry is
//! resolved to the [`NumberFormat`] it references, either a built-in id or a
//! custom code declared under `numFmts`.

use std::collections::HashMap;
use std::io::{BufReader, Read};

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::{XlsxError, XlsxResult};
use sheet2html_core::NumberFormat;

/// Number formats indexed by cell style (`s` attribute of a cell)
#[derive(Debug, Clone, Default)]
pub(crate) struct CellFormats {
    formats: Vec<NumberFormat>,
}

impl CellFormats {
    /// Format for a cell style index; unknown indices fall back to General
    pub(crate) fn get(&self, style_index: u32) -> NumberFormat {
        match self.formats.get(style_index as usize) {
            Some(format) => format.clone(),
            None => {
                if style_index != 0 {
                    log::warn!("style index {} out of bounds, using General", style_index);
                }
                NumberFormat::General
            }
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.formats.len()
    }
}

pub(crate) fn read_styles_xml<R: Read>(reader: R) -> XlsxResult<CellFormats> {
    let mut xml_reader = Reader::from_reader(BufReader::new(reader));
    xml_reader.trim_text(true);

    let mut buf = Vec::new();

    let mut custom: HashMap<u32, String> = HashMap::new();
    let mut xf_ids: Vec<u32> = Vec::new();
    let mut in_cell_xfs = false;

    loop {
        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"cellXfs" => in_cell_xfs = true,
                b"xf" if in_cell_xfs => xf_ids.push(num_fmt_id(&e)),
                b"numFmt" => insert_num_fmt(&e, &mut custom),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"xf" if in_cell_xfs => xf_ids.push(num_fmt_id(&e)),
                b"numFmt" => insert_num_fmt(&e, &mut custom),
                _ => {}
            },
            Ok(Event::End(e)) => {
                if e.local_name().as_ref() == b"cellXfs" {
                    in_cell_xfs = false;
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(XlsxError::Xml(e)),
            _ => {}
        }

        buf.clear();
    }

    // numFmts precedes cellXfs in practice, but resolve afterwards anyway
    let formats = xf_ids
        .into_iter()
        .map(|id| match custom.get(&id) {
            Some(code) => NumberFormat::Custom(code.clone()),
            None => NumberFormat::from_id(id),
        })
        .collect();

    Ok(CellFormats { formats })
}

fn num_fmt_id(e: &BytesStart<'_>) -> u32 {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == b"numFmtId")
        .and_then(|attr| attr.unescape_value().ok()?.parse().ok())
        .unwrap_or(NumberFormat::ID_GENERAL)
}

fn insert_num_fmt(e: &BytesStart<'_>, custom: &mut HashMap<u32, String>) {
    let mut id = None;
    let mut code = None;
    for attr in e.attributes().flatten() {
        match attr.key.as_ref() {
            b"numFmtId" => id = attr.unescape_value().ok().and_then(|s| s.parse().ok()),
            b"formatCode" => code = attr.unescape_value().ok().map(|s| s.to_string()),
            _ => {}
        }
    }
    if let (Some(id), Some(code)) = (id, code) {
        custom.insert(id, code);
    }
}
