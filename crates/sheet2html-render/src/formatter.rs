//! Cell value formatting
//!
//! A [`CellFormatter`] turns one cell into the markup that goes between
//! `<td>` and `</td>`. The renderer owns no formatting policy of its own; it
//! hands every origin cell to the formatter it was constructed with.

use std::borrow::Cow;
use std::fmt::Write as _;

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDateTime;
use quick_xml::escape::escape;

use crate::error::{RenderError, RenderResult};
use sheet2html_core::date::serial_to_datetime;
use sheet2html_core::{CellData, CellValue, Hyperlink};

/// Default pattern for date cells
pub const DEFAULT_DATE_PATTERN: &str = "%Y-%m-%d %H:%M:%S";

/// Everything a formatter may look at for one cell
#[derive(Debug, Clone, Copy)]
pub struct CellRef<'a> {
    /// Row index (0-based)
    pub row: u32,
    /// Column index (0-based)
    pub col: u16,
    /// The cell's value and number format
    pub data: &'a CellData,
    /// First hyperlink covering the cell
    pub hyperlink: Option<&'a Hyperlink>,
    /// Workbook uses the 1904 date system
    pub date_1904: bool,
    /// Escape HTML special characters in the produced markup
    pub escape_html: bool,
}

/// Turns a cell into its `<td>` content
pub trait CellFormatter {
    /// Markup for the cell's content
    fn format(&self, cell: &CellRef<'_>) -> String;
}

impl<F: CellFormatter + ?Sized> CellFormatter for &F {
    fn format(&self, cell: &CellRef<'_>) -> String {
        (**self).format(cell)
    }
}

impl<F: CellFormatter + ?Sized> CellFormatter for Box<F> {
    fn format(&self, cell: &CellRef<'_>) -> String {
        (**self).format(cell)
    }
}

/// The semantic kind of a cell's value
#[derive(Debug, Clone, PartialEq)]
pub enum CellContent<'a> {
    /// A number shown as a number
    Numeric(f64),
    /// A number whose display format is a date format
    DateTime(NaiveDateTime),
    /// A string
    Text(&'a str),
    /// Anything else, already in its display form
    Other(String),
}

impl<'a> CellContent<'a> {
    /// Classify a cell.
    ///
    /// Formulas are classified by their cached result; a formula without one
    /// shows its text. Date-formatted numbers that are not valid serial dates
    /// stay numeric.
    pub fn of(data: &'a CellData, date_1904: bool) -> Self {
        match data.value.effective_value() {
            CellValue::Number(n) => {
                if data.number_format.is_date_format() {
                    if let Some(dt) = serial_to_datetime(*n, date_1904) {
                        return CellContent::DateTime(dt);
                    }
                }
                CellContent::Numeric(*n)
            }
            CellValue::String(s) => CellContent::Text(s.as_str()),
            CellValue::Empty => CellContent::Other(String::new()),
            other => CellContent::Other(other.to_string()),
        }
    }
}

/// Escape `&`, `<`, `>`, `"` and `'` when `enabled`
pub fn escape_html(text: &str, enabled: bool) -> Cow<'_, str> {
    if enabled {
        escape(text)
    } else {
        Cow::Borrowed(text)
    }
}

/// Wrap cell markup in a link that opens in a new browsing context
pub fn wrap_hyperlink(content: &str, link: &Hyperlink, escape_enabled: bool) -> String {
    format!(
        "<a target=\"_blank\" href=\"{}\">{}</a>",
        escape_html(&link.address(), escape_enabled),
        content
    )
}

/// Formats date cells with a strftime-style pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormatter {
    pattern: String,
}

impl DateFormatter {
    /// Create a formatter, rejecting patterns chrono cannot parse
    pub fn new<S: Into<String>>(pattern: S) -> RenderResult<Self> {
        let pattern = pattern.into();
        if StrftimeItems::new(&pattern).any(|item| matches!(item, Item::Error)) {
            return Err(RenderError::InvalidDatePattern(pattern));
        }
        Ok(Self { pattern })
    }

    /// The strftime pattern
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Format a date-time
    pub fn format(&self, datetime: &NaiveDateTime) -> String {
        let mut out = String::new();
        // Offsets and time zones cannot be formatted for a naive date-time
        if write!(out, "{}", datetime.format(&self.pattern)).is_err() {
            out.clear();
            let _ = write!(out, "{}", datetime.format(DEFAULT_DATE_PATTERN));
        }
        out
    }
}

impl Default for DateFormatter {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_DATE_PATTERN.to_string(),
        }
    }
}

/// Locale conventions for plain numbers
///
/// Rounding to `max_fraction_digits` is half-to-even on the shortest
/// decimal representation of the value; trailing fractional zeros are
/// dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberLocale {
    /// Separator between groups of three integer digits (`None` disables grouping)
    pub grouping_separator: Option<char>,
    /// Separator between the integer and fractional parts
    pub decimal_separator: char,
    /// Maximum number of fractional digits shown
    pub max_fraction_digits: usize,
}

impl Default for NumberLocale {
    fn default() -> Self {
        Self {
            grouping_separator: Some(','),
            decimal_separator: '.',
            max_fraction_digits: 3,
        }
    }
}

impl NumberLocale {
    /// Format a number
    pub fn format(&self, value: f64) -> String {
        if value.is_nan() {
            return "NaN".to_string();
        }
        if value.is_infinite() {
            return if value < 0.0 { "-∞" } else { "∞" }.to_string();
        }

        let (int_part, frac_part) = self.rounded_digits(value.abs());

        let mut out = String::with_capacity(int_part.len() * 4 / 3 + frac_part.len() + 2);
        // Values that round to zero lose their sign
        if value < 0.0 && (int_part != "0" || !frac_part.is_empty()) {
            out.push('-');
        }

        let digits = int_part.len();
        for (i, c) in int_part.chars().enumerate() {
            if i > 0 && (digits - i) % 3 == 0 {
                if let Some(sep) = self.grouping_separator {
                    out.push(sep);
                }
            }
            out.push(c);
        }

        if !frac_part.is_empty() {
            out.push(self.decimal_separator);
            out.push_str(&frac_part);
        }

        out
    }

    /// Integer and fractional digits of a non-negative finite value, rounded
    ///
    /// Works from the shortest decimal digits that round-trip to `value`, so
    /// magnitudes beyond 2^53 are padded with zeros instead of printing the
    /// binary expansion. Trailing fractional zeros are dropped.
    fn rounded_digits(&self, value: f64) -> (String, String) {
        let sci = format!("{:e}", value);
        let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
        let exponent: i64 = exponent.parse().unwrap_or(0);
        let mut digits: Vec<u8> = mantissa
            .bytes()
            .filter(u8::is_ascii_digit)
            .map(|b| b - b'0')
            .collect();

        // Position of the decimal point within `digits`
        let mut int_len = exponent + 1;
        if int_len < 1 {
            let mut padded = vec![0; (1 - int_len) as usize];
            padded.extend_from_slice(&digits);
            digits = padded;
            int_len = 1;
        }
        let mut int_len = int_len as usize;
        if digits.len() < int_len {
            digits.resize(int_len, 0);
        }

        let keep = int_len + self.max_fraction_digits;
        if digits.len() > keep {
            let first_dropped = digits[keep];
            let rest_nonzero = digits[keep + 1..].iter().any(|&d| d != 0);
            let round_up = first_dropped > 5
                || (first_dropped == 5 && (rest_nonzero || digits[keep - 1] % 2 == 1));
            digits.truncate(keep);

            if round_up {
                let mut carry = true;
                for d in digits.iter_mut().rev() {
                    if *d == 9 {
                        *d = 0;
                    } else {
                        *d += 1;
                        carry = false;
                        break;
                    }
                }
                if carry {
                    digits.insert(0, 1);
                    int_len += 1;
                }
            }
        }

        let to_text = |ds: &[u8]| ds.iter().map(|d| char::from(b'0' + d)).collect::<String>();
        let int_text = to_text(&digits[..int_len]);
        let int_text = match int_text.trim_start_matches('0') {
            "" => "0".to_string(),
            trimmed => trimmed.to_string(),
        };
        let frac_text = to_text(&digits[int_len..]).trim_end_matches('0').to_string();
        (int_text, frac_text)
    }
}

/// Formatter used unless the caller supplies another one
///
/// Numbers use the [`NumberLocale`], date-formatted numbers the
/// [`DateFormatter`], everything else its plain text form. Linked cells of
/// any kind are wrapped in an anchor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefaultCellFormatter {
    /// Formatter for date cells
    pub date: DateFormatter,
    /// Locale for numeric cells
    pub number: NumberLocale,
}

impl DefaultCellFormatter {
    /// Create a formatter from its parts
    pub fn new(date: DateFormatter, number: NumberLocale) -> Self {
        Self { date, number }
    }

    /// Plain display text (not markup) for a classified value
    pub fn format_content(&self, content: &CellContent<'_>) -> String {
        match content {
            CellContent::Numeric(n) => self.number.format(*n),
            CellContent::DateTime(dt) => self.date.format(dt),
            CellContent::Text(s) => (*s).to_string(),
            CellContent::Other(s) => s.clone(),
        }
    }
}

impl CellFormatter for DefaultCellFormatter {
    fn format(&self, cell: &CellRef<'_>) -> String {
        let text = self.format_content(&CellContent::of(cell.data, cell.date_1904));
        let text = escape_html(&text, cell.escape_html);
        match cell.hyperlink {
            Some(link) => wrap_hyperlink(&text, link, cell.escape_html),
            None => text.into_owned(),
        }
    }
}
