//! Cell hyperlinks

use crate::cell::CellRange;

/// Where a hyperlink points
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HyperlinkTarget {
    /// External address (URL, mailto:, file path), resolved through the
    /// sheet's relationship part
    External(String),
    /// Location inside the workbook (e.g., "Sheet2!A1")
    Internal(String),
}

/// A hyperlink attached to one cell or a block of cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hyperlink {
    /// Cells the link applies to
    pub range: CellRange,
    /// Link target
    pub target: HyperlinkTarget,
    /// Optional tooltip text
    pub tooltip: Option<String>,
}

impl Hyperlink {
    /// Create an external hyperlink
    pub fn external<S: Into<String>>(range: CellRange, url: S) -> Self {
        Self {
            range,
            target: HyperlinkTarget::External(url.into()),
            tooltip: None,
        }
    }

    /// Create a link to a location inside the workbook
    pub fn internal<S: Into<String>>(range: CellRange, location: S) -> Self {
        Self {
            range,
            target: HyperlinkTarget::Internal(location.into()),
            tooltip: None,
        }
    }

    /// The address to put in an `href`
    ///
    /// Internal locations become fragment references (`#Sheet2!A1`).
    pub fn address(&self) -> String {
        match &self.target {
            HyperlinkTarget::External(url) => url.clone(),
            HyperlinkTarget::Internal(location) => format!("#{}", location),
        }
    }
}
