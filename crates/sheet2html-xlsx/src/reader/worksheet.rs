//! Worksheet part (`xl/worksheets/sheetN.xml`) parsing

use std::io::{BufReader, Read};

use chrono::{NaiveDate, NaiveDateTime};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use super::decode_excel_escapes;
use crate::error::{XlsxError, XlsxResult};
use crate::styles::CellFormats;
use sheet2html_core::date::datetime_to_serial;
use sheet2html_core::{
    CellAddress, CellData, CellError, CellRange, CellValue, NumberFormat, Worksheet,
};

/// Workbook-wide tables a worksheet refers to
pub(crate) struct SheetContext<'a> {
    pub shared_strings: &'a [String],
    pub formats: &'a CellFormats,
    pub date_1904: bool,
}

/// A `<hyperlink>` element before its relationship id is resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawHyperlink {
    pub range: CellRange,
    pub rel_id: Option<String>,
    pub location: Option<String>,
    pub tooltip: Option<String>,
}

/// Cell state accumulated between `<c>` and `</c>`
#[derive(Debug, Default)]
struct PendingCell {
    row: u32,
    col: u16,
    cell_type: Option<String>,
    style: u32,
    value: Option<String>,
    formula: Option<String>,
    inline: Option<String>,
}

impl PendingCell {
    fn finish(self, ctx: &SheetContext<'_>) -> XlsxResult<CellData> {
        let raw = match self.cell_type.as_deref() {
            Some("inlineStr") => self.inline.as_deref().or(self.value.as_deref()),
            _ => self.value.as_deref(),
        };

        let typed = raw
            .map(|v| typed_value(self.cell_type.as_deref(), v, ctx))
            .transpose()?;

        let mut number_format = ctx.formats.get(self.style);
        if self.cell_type.as_deref() == Some("d")
            && number_format == NumberFormat::General
            && matches!(typed, Some(CellValue::Number(_)))
        {
            number_format = NumberFormat::datetime();
        }

        let value = match self.formula {
            Some(text) if !text.is_empty() => CellValue::Formula {
                text: if text.starts_with('=') {
                    text
                } else {
                    format!("={}", text)
                },
                cached_value: typed.map(Box::new),
            },
            // Shared-formula followers carry no text, only the cached result
            _ => typed.unwrap_or(CellValue::Empty),
        };

        Ok(CellData::with_format(value, number_format))
    }
}

/// Interpret a raw `<v>` (or inline string) according to the cell's `t`
fn typed_value(cell_type: Option<&str>, value: &str, ctx: &SheetContext<'_>) -> XlsxResult<CellValue> {
    let typed = match cell_type {
        // Shared string
        Some("s") => {
            let idx: usize = value.trim().parse().map_err(|_| {
                XlsxError::Parse(format!("Invalid shared string index: {}", value))
            })?;
            let s = ctx.shared_strings.get(idx).ok_or_else(|| {
                XlsxError::Parse(format!("Shared string index {} out of bounds", idx))
            })?;
            CellValue::string(s.as_str())
        }

        Some("b") => CellValue::Boolean(value == "1" || value.eq_ignore_ascii_case("true")),

        Some("e") => CellError::parse(value)
            .map(CellValue::Error)
            .unwrap_or_else(|| CellValue::string(value)),

        Some("inlineStr") | Some("str") => CellValue::string(decode_excel_escapes(value)),

        // ISO 8601 date stored as text
        Some("d") => match parse_iso_datetime(value)
            .and_then(|dt| datetime_to_serial(dt, ctx.date_1904))
        {
            Some(serial) => CellValue::Number(serial),
            None => CellValue::string(value),
        },

        None | Some("n") => match value.trim().parse::<f64>() {
            Ok(n) => CellValue::Number(n),
            Err(_) => CellValue::string(value),
        },

        Some(_) => CellValue::string(value),
    };
    Ok(typed)
}

fn parse_iso_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim().trim_end_matches('Z');
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Read a worksheet part into `worksheet`.
///
/// Returns the sheet's hyperlinks unresolved; external targets live in the
/// sheet's relationship part.
pub(crate) fn read_worksheet_xml<R: Read>(
    reader: R,
    worksheet: &mut Worksheet,
    ctx: &SheetContext<'_>,
) -> XlsxResult<Vec<RawHyperlink>> {
    let mut xml_reader = Reader::from_reader(BufReader::new(reader));
    // Inline strings may carry significant whitespace
    xml_reader.trim_text(false);

    let mut buf = Vec::new();
    let mut hyperlinks = Vec::new();

    // Position of the next row/cell when `r` attributes are omitted
    let mut current_row: Option<u32> = None;
    let mut next_col: u16 = 0;

    let mut cell: Option<PendingCell> = None;
    let mut in_value = false;
    let mut in_formula = false;
    let mut in_inline_str = false;
    let mut in_inline_text = false;
    let mut in_phonetic = false;

    loop {
        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"row" => {
                    current_row = Some(row_index(&e, current_row));
                    next_col = 0;
                }
                b"c" => {
                    let pending = start_cell(&e, current_row.unwrap_or(0), next_col)?;
                    next_col = pending.col.saturating_add(1);
                    cell = Some(pending);
                }
                b"v" if cell.is_some() => in_value = true,
                b"f" if cell.is_some() => {
                    in_formula = true;
                    if let Some(c) = cell.as_mut() {
                        c.formula.get_or_insert_with(String::new);
                    }
                }
                b"is" if cell.is_some() => {
                    in_inline_str = true;
                    if let Some(c) = cell.as_mut() {
                        c.inline.get_or_insert_with(String::new);
                    }
                }
                b"rPh" if in_inline_str => in_phonetic = true,
                b"t" if in_inline_str && !in_phonetic => in_inline_text = true,
                b"mergeCell" => read_merge_cell(&e, worksheet),
                b"hyperlink" => hyperlinks.extend(read_hyperlink(&e)),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"row" => {
                    current_row = Some(row_index(&e, current_row));
                    next_col = 0;
                }
                b"c" => {
                    // Cell without content; it still occupies its position
                    let pending = start_cell(&e, current_row.unwrap_or(0), next_col)?;
                    next_col = pending.col.saturating_add(1);
                    let (row, col) = (pending.row, pending.col);
                    worksheet.set_cell_at(row, col, pending.finish(ctx)?)?;
                }
                b"f" => {
                    if let Some(c) = cell.as_mut() {
                        c.formula.get_or_insert_with(String::new);
                    }
                }
                b"mergeCell" => read_merge_cell(&e, worksheet),
                b"hyperlink" => hyperlinks.extend(read_hyperlink(&e)),
                _ => {}
            },
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"c" => {
                    if let Some(pending) = cell.take() {
                        let (row, col) = (pending.row, pending.col);
                        worksheet.set_cell_at(row, col, pending.finish(ctx)?)?;
                    }
                    in_value = false;
                    in_formula = false;
                    in_inline_str = false;
                    in_inline_text = false;
                    in_phonetic = false;
                }
                b"v" => in_value = false,
                b"f" => in_formula = false,
                b"is" => in_inline_str = false,
                b"rPh" => in_phonetic = false,
                b"t" => in_inline_text = false,
                _ => {}
            },
            Ok(Event::Text(e)) => {
                if let Some(c) = cell.as_mut() {
                    let target = if in_value {
                        Some(c.value.get_or_insert_with(String::new))
                    } else if in_formula {
                        c.formula.as_mut()
                    } else if in_inline_text {
                        c.inline.as_mut()
                    } else {
                        None
                    };
                    if let Some(target) = target {
                        target.push_str(&e.unescape()?);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(XlsxError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(hyperlinks)
}

/// 0-based index of a `<row>`; rows without `r` follow the previous one
fn row_index(e: &BytesStart<'_>, previous: Option<u32>) -> u32 {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == b"r")
        .and_then(|attr| attr.unescape_value().ok()?.trim().parse::<u32>().ok())
        .map(|r| r.saturating_sub(1))
        .unwrap_or_else(|| previous.map_or(0, |p| p + 1))
}

fn start_cell(e: &BytesStart<'_>, row: u32, col: u16) -> XlsxResult<PendingCell> {
    let mut pending = PendingCell {
        row,
        col,
        ..Default::default()
    };

    for attr in e.attributes().flatten() {
        match attr.key.as_ref() {
            b"r" => {
                let cell_ref = attr.unescape_value()?;
                let addr = CellAddress::parse(&cell_ref).map_err(|err| {
                    XlsxError::Parse(format!("Invalid cell reference '{}': {}", cell_ref, err))
                })?;
                pending.row = addr.row;
                pending.col = addr.col;
            }
            b"t" => pending.cell_type = attr.unescape_value().ok().map(|s| s.to_string()),
            b"s" => {
                pending.style = attr
                    .unescape_value()
                    .ok()
                    .and_then(|s| s.parse::<u32>().ok())
                    .unwrap_or(0);
            }
            _ => {}
        }
    }

    Ok(pending)
}

fn read_merge_cell(e: &BytesStart<'_>, worksheet: &mut Worksheet) {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == b"ref" {
            let ref_str = String::from_utf8_lossy(&attr.value);
            match CellRange::parse(&ref_str) {
                Ok(range) => worksheet.push_merged_region(range),
                Err(err) => log::warn!(
                    "sheet '{}': skipping merge region '{}': {}",
                    worksheet.name(),
                    ref_str,
                    err
                ),
            }
        }
    }
}

fn read_hyperlink(e: &BytesStart<'_>) -> Option<RawHyperlink> {
    let mut range = None;
    let mut rel_id = None;
    let mut location = None;
    let mut tooltip = None;

    for attr in e.attributes().flatten() {
        let value = match attr.unescape_value() {
            Ok(v) => v.to_string(),
            Err(_) => continue,
        };
        match attr.key.local_name().as_ref() {
            b"ref" => match CellRange::parse(&value) {
                Ok(r) => range = Some(r),
                Err(err) => {
                    log::warn!("skipping hyperlink with ref '{}': {}", value, err);
                    return None;
                }
            },
            // r:id
            b"id" => rel_id = Some(value),
            b"location" => location = Some(value),
            b"tooltip" => tooltip = Some(value),
            _ => {}
        }
    }

    match range {
        Some(range) => Some(RawHyperlink {
            range,
            rel_id,
            location,
            tooltip,
        }),
        None => {
            log::warn!("skipping hyperlink without ref");
            None
        }
    }
}
