//! HTML output options

/// Which sheets of a workbook are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SheetSelection {
    /// Every sheet, each table captioned when there is more than one
    #[default]
    All,
    /// Only the first sheet, without a caption
    First,
}

/// Options for rendering HTML
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlOptions {
    /// Document title (empty `<title>` when unset)
    pub title: Option<String>,
    /// Sheets to render
    pub sheets: SheetSelection,
    /// Wrap the tables in a complete HTML document
    pub emit_boilerplate: bool,
    /// Escape HTML special characters in cell text, links, captions and title
    pub escape_html: bool,
    /// Markup written after every table
    pub separator: String,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            title: None,
            sheets: SheetSelection::All,
            emit_boilerplate: true,
            escape_html: true,
            separator: "<br>\n".to_string(),
        }
    }
}

impl HtmlOptions {
    /// Set the document title
    pub fn with_title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the sheet selection
    pub fn with_sheets(mut self, sheets: SheetSelection) -> Self {
        self.sheets = sheets;
        self
    }
}
