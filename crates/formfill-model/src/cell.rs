//! Raw spreadsheet cell values.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};

/// A loosely-typed cell as it came out of the spreadsheet.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// Blank cell, or a column the row did not reach.
    #[default]
    Empty,
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
    /// Spreadsheet error cell (`#N/A`, `#DIV/0!`, ...).
    Error(String),
}

impl CellValue {
    /// Returns true for cells that carry no usable value.
    ///
    /// Error cells and NaN floats count as missing, the same way a blank does.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        match self {
            Self::Empty | Self::Error(_) => true,
            Self::Float(value) => value.is_nan(),
            _ => false,
        }
    }

    /// Returns the string payload when the cell is textual.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    /// Short type label used in diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::String(_) => "string",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Bool(_) => "bool",
            Self::DateTime(_) => "datetime",
            Self::Error(_) => "error",
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::String(value) | Self::Error(value) => f.write_str(value),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{}", format_float(*value)),
            Self::Bool(true) => f.write_str("True"),
            Self::Bool(false) => f.write_str("False"),
            Self::DateTime(value) => write!(f, "{}", value.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

/// Largest serial Excel accepts (9999-12-31).
pub const MAX_EXCEL_SERIAL: f64 = 2_958_465.0;

/// Converts an Excel serial day number (1900 date system) to a date-time.
///
/// Serials below 61 sit before Excel's phantom 1900-02-29 and use an epoch one
/// day later. Returns `None` outside `1..=MAX_EXCEL_SERIAL`.
#[must_use]
pub fn excel_serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || !(1.0..MAX_EXCEL_SERIAL + 1.0).contains(&serial) {
        return None;
    }
    let epoch = if serial < 61.0 {
        NaiveDate::from_ymd_opt(1899, 12, 31)?
    } else {
        NaiveDate::from_ymd_opt(1899, 12, 30)?
    };
    let days = serial.trunc() as i64;
    let seconds = ((serial - serial.trunc()) * 86_400.0).round() as i64;
    let midnight = epoch
        .checked_add_signed(chrono::TimeDelta::try_days(days)?)?
        .and_time(chrono::NaiveTime::MIN);
    midnight.checked_add_signed(chrono::TimeDelta::try_seconds(seconds)?)
}

/// Whole floats keep a `.0` suffix so they stay distinguishable from integers.
fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(value: NaiveDateTime) -> Self {
        Self::DateTime(value)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(value: NaiveDate) -> Self {
        Self::DateTime(value.and_time(chrono::NaiveTime::MIN))
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Empty, Into::into)
    }
}
