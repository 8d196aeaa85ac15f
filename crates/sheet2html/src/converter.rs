//! Workbook to HTML conversion

use std::io::Write;
use std::path::Path;

use crate::error::{Error, Result};
use sheet2html_core::Workbook;
use sheet2html_render::{
    write_atomically, CellFormatter, DefaultCellFormatter, HtmlOptions, HtmlWriter,
};
use sheet2html_xlsx::XlsxReader;

/// Converts workbook files to HTML documents
///
/// A converter holds the rendering options and the cell formatter; it can be
/// reused for any number of files.
#[derive(Debug, Clone)]
pub struct Converter<F: CellFormatter = DefaultCellFormatter> {
    options: HtmlOptions,
    formatter: F,
}

impl Converter<DefaultCellFormatter> {
    /// Create a converter with the default cell formatter
    pub fn new(options: HtmlOptions) -> Self {
        Self {
            options,
            formatter: DefaultCellFormatter::default(),
        }
    }
}

impl Default for Converter<DefaultCellFormatter> {
    fn default() -> Self {
        Self::new(HtmlOptions::default())
    }
}

impl<F: CellFormatter> Converter<F> {
    /// Replace the cell formatter
    pub fn with_formatter<G: CellFormatter>(self, formatter: G) -> Converter<G> {
        Converter {
            options: self.options,
            formatter,
        }
    }

    /// Rendering options
    pub fn options(&self) -> &HtmlOptions {
        &self.options
    }

    /// The cell formatter
    pub fn formatter(&self) -> &F {
        &self.formatter
    }

    /// Render an already loaded workbook
    ///
    /// `title` overrides the title in the options when non-empty.
    pub fn convert_workbook(&self, workbook: &Workbook, title: Option<&str>) -> String {
        match title.filter(|t| !t.is_empty()) {
            Some(title) => {
                let options = self.options.clone().with_title(title);
                HtmlWriter::render_workbook(workbook, &self.formatter, &options)
            }
            None => HtmlWriter::render_workbook(workbook, &self.formatter, &self.options),
        }
    }

    /// Read a workbook file and render it
    ///
    /// The title is, in order of preference: `title` when non-empty, the title
    /// in the options, then [`default_title`] of the path.
    pub fn convert_file<P: AsRef<Path>>(&self, path: P, title: Option<&str>) -> Result<String> {
        let path = path.as_ref();
        let workbook = XlsxReader::read_file(path).map_err(|source| Error::DocumentRead {
            path: path.to_path_buf(),
            source,
        })?;

        let title = title
            .filter(|t| !t.is_empty())
            .map(str::to_owned)
            .or_else(|| self.options.title.clone())
            .unwrap_or_else(|| default_title(path));

        log::debug!(
            "converting {} ({} sheets) with title '{}'",
            path.display(),
            workbook.sheet_count(),
            title
        );
        Ok(self.convert_workbook(&workbook, Some(&title)))
    }

    /// Read a workbook file and write the HTML to `output`
    ///
    /// The document is rendered in memory and then moved into place through a
    /// temporary file, so `output` is left untouched when reading or writing
    /// fails.
    pub fn convert_to_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input: P,
        output: Q,
        title: Option<&str>,
    ) -> Result<()> {
        let html = self.convert_file(input, title)?;
        let output = output.as_ref();
        write_atomically(output, |file| file.write_all(html.as_bytes())).map_err(|source| {
            Error::OutputWrite {
                path: output.to_path_buf(),
                source,
            }
        })?;
        log::debug!("wrote {}", output.display());
        Ok(())
    }
}

/// File name of `path` without its final extension
///
/// `report.v2.xlsx` becomes `report.v2`; a name without a dot is kept whole.
pub fn default_title<P: AsRef<Path>>(path: P) -> String {
    let name = path
        .as_ref()
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match name.rsplit_once('.') {
        Some((stem, _)) => stem.to_string(),
        None => name,
    }
}

/// Whether an output argument means standard output
///
/// Absent, empty and `std` (any case) all select standard output.
pub fn is_stdout_target(arg: Option<&str>) -> bool {
    match arg {
        None => true,
        Some(arg) => arg.is_empty() || arg.eq_ignore_ascii_case("std"),
    }
}
