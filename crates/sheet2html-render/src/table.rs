//! Single-sheet table rendering

use std::fmt::Write as _;

use crate::formatter::{escape_html, CellFormatter, CellRef};
use crate::merge_index::MergeIndex;
use crate::options::HtmlOptions;
use crate::writer::{push_document_end, push_document_start};
use sheet2html_core::Worksheet;

/// Renders one worksheet as one `<table>`
///
/// Rows and cells are visited in document order. Each cell the merge index
/// reports as an origin becomes a `<td>`, with `rowspan`/`colspan` written
/// only for spans above 1; other cells are skipped. A row that emits no cell
/// emits no `<tr>` either.
pub struct TableRenderer<'a, F: CellFormatter + ?Sized> {
    formatter: &'a F,
    options: &'a HtmlOptions,
}

impl<'a, F: CellFormatter + ?Sized> TableRenderer<'a, F> {
    /// Create a renderer
    pub fn new(formatter: &'a F, options: &'a HtmlOptions) -> Self {
        Self { formatter, options }
    }

    /// Render `sheet` as a table, captioned when `caption` is non-empty
    pub fn render(&self, sheet: &Worksheet, caption: Option<&str>, date_1904: bool) -> String {
        let mut out = String::new();
        self.render_into(&mut out, sheet, caption, date_1904);
        out
    }

    pub(crate) fn render_into(
        &self,
        out: &mut String,
        sheet: &Worksheet,
        caption: Option<&str>,
        date_1904: bool,
    ) {
        let escape = self.options.escape_html;
        let index = MergeIndex::new(sheet.merged_regions());

        out.push_str("<table border=\"1\" cellspacing=\"0\">\n");
        if let Some(caption) = caption.filter(|c| !c.is_empty()) {
            let _ = writeln!(out, "<caption>{}</caption>", escape_html(caption, escape));
        }

        let mut row_markup = String::new();
        for row in sheet.rows() {
            row_markup.clear();

            for &(col, data) in &row.cells {
                let placement = index.placement_of(row.index, col);
                if !placement.is_origin() {
                    continue;
                }

                let cell = CellRef {
                    row: row.index,
                    col,
                    data,
                    hyperlink: sheet.hyperlink_at(row.index, col),
                    date_1904,
                    escape_html: escape,
                };

                row_markup.push_str("\t\t<td");
                if placement.row_span > 1 {
                    let _ = write!(row_markup, " rowspan=\"{}\"", placement.row_span);
                }
                if placement.col_span > 1 {
                    let _ = write!(row_markup, " colspan=\"{}\"", placement.col_span);
                }
                row_markup.push('>');
                row_markup.push_str(&self.formatter.format(&cell));
                row_markup.push_str("</td>\n");
            }

            if !row_markup.is_empty() {
                out.push_str("\t<tr>\n");
                out.push_str(&row_markup);
                out.push_str("\t</tr>\n");
            }
        }

        out.push_str("</table>\n");
    }
}

/// Render a single sheet on its own.
///
/// Produces one uncaptioned table, followed by the separator and wrapped in
/// the document boilerplate when `options.emit_boilerplate` is set. Dates use
/// the 1900 date system.
pub fn render_sheet<F: CellFormatter + ?Sized>(
    sheet: &Worksheet,
    formatter: &F,
    options: &HtmlOptions,
) -> String {
    let mut out = String::new();
    if options.emit_boilerplate {
        push_document_start(&mut out, options);
    }
    TableRenderer::new(formatter, options).render_into(&mut out, sheet, None, false);
    out.push_str(&options.separator);
    if options.emit_boilerplate {
        push_document_end(&mut out);
    }
    out
}
