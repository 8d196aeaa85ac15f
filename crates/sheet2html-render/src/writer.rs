//! HTML document writer

use std::fmt::Write as _;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::RenderResult;
use crate::formatter::{escape_html, CellFormatter};
use crate::options::{HtmlOptions, SheetSelection};
use crate::table::TableRenderer;
use sheet2html_core::Workbook;

/// Assembles the tables of a workbook into one HTML document
pub struct HtmlWriter;

impl HtmlWriter {
    /// Render a workbook to an HTML string
    ///
    /// Each selected sheet becomes one table followed by the separator. Tables
    /// are captioned with their sheet name only when every sheet is rendered
    /// and the workbook has more than one.
    pub fn render_workbook<F: CellFormatter + ?Sized>(
        workbook: &Workbook,
        formatter: &F,
        options: &HtmlOptions,
    ) -> String {
        let mut out = String::new();
        if options.emit_boilerplate {
            push_document_start(&mut out, options);
        }

        let renderer = TableRenderer::new(formatter, options);
        let date_1904 = workbook.settings().date_1904;
        let captioned = options.sheets == SheetSelection::All && workbook.sheet_count() > 1;
        let limit = match options.sheets {
            SheetSelection::All => usize::MAX,
            SheetSelection::First => 1,
        };

        for sheet in workbook.worksheets().take(limit) {
            log::debug!(
                "rendering sheet '{}' ({} cells, {} merge regions)",
                sheet.name(),
                sheet.cell_count(),
                sheet.merged_regions().len()
            );
            let caption = captioned.then(|| sheet.name());
            renderer.render_into(&mut out, sheet, caption, date_1904);
            out.push_str(&options.separator);
        }

        if options.emit_boilerplate {
            push_document_end(&mut out);
        }
        out
    }

    /// Write a workbook as HTML to a writer
    pub fn write<W: Write, F: CellFormatter + ?Sized>(
        workbook: &Workbook,
        mut writer: W,
        formatter: &F,
        options: &HtmlOptions,
    ) -> RenderResult<()> {
        let html = Self::render_workbook(workbook, formatter, options);
        writer.write_all(html.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// Write a workbook as HTML to a file
    ///
    /// The document is rendered completely, written to a temporary file in
    /// the destination directory and then moved over `path`. On failure
    /// `path` keeps its previous content.
    pub fn write_file<P: AsRef<Path>, F: CellFormatter + ?Sized>(
        workbook: &Workbook,
        path: P,
        formatter: &F,
        options: &HtmlOptions,
    ) -> RenderResult<()> {
        let html = Self::render_workbook(workbook, formatter, options);
        write_atomically(path, |file| file.write_all(html.as_bytes()))?;
        Ok(())
    }
}

/// Replace the file at `path` with whatever `write` produces
///
/// Output goes to a temporary file next to `path`, which is renamed into
/// place only after `write` succeeds. The temporary file is removed on
/// failure.
pub fn write_atomically<P, W>(path: P, write: W) -> io::Result<()>
where
    P: AsRef<Path>,
    W: FnOnce(&mut File) -> io::Result<()>,
{
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    write(tmp.as_file_mut())?;
    tmp.as_file_mut().flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

pub(crate) fn push_document_start(out: &mut String, options: &HtmlOptions) {
    let title = options.title.as_deref().unwrap_or("");
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n\t<meta charset=\"UTF-8\">\n");
    let _ = writeln!(out, "\t<title>{}</title>", escape_html(title, options.escape_html));
    out.push_str("</head>\n<body>\n");
}

pub(crate) fn push_document_end(out: &mut String) {
    out.push_str("</body>\n</html>\n");
}
