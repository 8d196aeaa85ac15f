//! Number format types

/// Number format for cell display
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum NumberFormat {
    /// General format (default)
    #[default]
    General,

    /// Built-in format by ID
    BuiltIn(u32),

    /// Custom format string
    Custom(String),
}

impl NumberFormat {
    /// 0 - General
    pub const ID_GENERAL: u32 = 0;
    /// 14 - mm-dd-yy
    pub const ID_DATE_SHORT: u32 = 14;
    /// 22 - m/d/yy h:mm
    pub const ID_DATETIME: u32 = 22;

    /// Create a number format from a format string
    pub fn from_string<S: Into<String>>(format: S) -> Self {
        NumberFormat::Custom(format.into())
    }

    /// Create a built-in format by ID; ID 0 is [`NumberFormat::General`]
    pub fn from_id(id: u32) -> Self {
        if id == Self::ID_GENERAL {
            NumberFormat::General
        } else {
            NumberFormat::BuiltIn(id)
        }
    }

    /// Short date (mm-dd-yy)
    pub fn date_short() -> Self {
        NumberFormat::BuiltIn(Self::ID_DATE_SHORT)
    }

    /// Date and time (m/d/yy h:mm)
    pub fn datetime() -> Self {
        NumberFormat::BuiltIn(Self::ID_DATETIME)
    }

    /// Check if this is a date/time format
    pub fn is_date_format(&self) -> bool {
        match self {
            NumberFormat::General => false,
            NumberFormat::BuiltIn(id) => matches!(id, 14..=22 | 45..=47),
            NumberFormat::Custom(code) => is_date_format_code(code),
        }
    }
}

/// Decide whether a custom format code displays a date or time.
///
/// Only the first section (positive numbers) is inspected. Quoted literals,
/// backslash escapes, padding directives and bracketed tokens are ignored,
/// except elapsed-time tokens such as `[h]` which make the code a time format.
fn is_date_format_code(code: &str) -> bool {
    let mut cleaned = String::with_capacity(code.len());
    let mut chars = code.chars();

    while let Some(c) = chars.next() {
        match c {
            ';' => break,
            '"' => {
                for q in chars.by_ref() {
                    if q == '"' {
                        break;
                    }
                }
            }
            '\\' | '_' | '*' => {
                chars.next();
            }
            '[' => {
                let mut token = String::new();
                for b in chars.by_ref() {
                    if b == ']' {
                        break;
                    }
                    token.push(b.to_ascii_lowercase());
                }
                if !token.is_empty() && token.chars().all(|t| matches!(t, 'h' | 'm' | 's')) {
                    return true;
                }
            }
            _ => cleaned.push(c.to_ascii_lowercase()),
        }
    }

    let cleaned = cleaned.replace("am/pm", "").replace("a/p", "");

    let mut has_token = false;
    let mut seen_seconds = false;
    for c in cleaned.chars() {
        match c {
            'y' | 'm' | 'd' | 'h' => has_token = true,
            's' => {
                has_token = true;
                seen_seconds = true;
            }
            // fractional seconds
            '0' if seen_seconds => {}
            '-' | '/' | ',' | '.' | ' ' | ':' | 't' | '年' | '月' | '日' => {}
            _ => return false,
        }
    }

    has_token
}
