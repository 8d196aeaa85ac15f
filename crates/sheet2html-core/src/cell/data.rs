//! Per-cell payload

use super::CellValue;
use crate::number_format::NumberFormat;

/// Complete data for a single cell
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellData {
    /// The cell's value
    pub value: CellValue,
    /// Display format resolved from the cell's style
    pub number_format: NumberFormat,
}

impl CellData {
    /// Create a new cell with a value and the General format
    pub fn new(value: CellValue) -> Self {
        Self {
            value,
            number_format: NumberFormat::General,
        }
    }

    /// Create a new cell with a value and display format
    pub fn with_format(value: CellValue, number_format: NumberFormat) -> Self {
        Self {
            value,
            number_format,
        }
    }

    /// True when the effective value is numeric and the format is a date format
    pub fn is_date_formatted(&self) -> bool {
        matches!(self.value.effective_value(), CellValue::Number(_))
            && self.number_format.is_date_format()
    }
}
