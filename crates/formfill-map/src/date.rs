//! Date parsing and rendering for date-mapped columns.
//!
//! Cells arrive either as real date cells, as Excel serial numbers, or as
//! free text typed by whoever filled the spreadsheet. Text is tried against a
//! fixed list of layouts, month-first for ambiguous slash dates (`04/05/2023`
//! is April 5th).

use std::fmt::{self, Write};

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use formfill_model::{CellValue, MAX_EXCEL_SERIAL, excel_serial_to_datetime};

/// Date-time layouts; the time part is dropped after parsing.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
];

/// Date-only layouts.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%d.%m.%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%d-%b-%Y",
];

/// Why a cell could not be read as a date.
#[derive(Debug, Clone, PartialEq)]
pub enum DateParseError {
    /// Text matched none of the accepted layouts.
    UnrecognizedFormat,
    /// Number outside the Excel serial range. The number stays out of the
    /// message, which ends up in logs.
    SerialOutOfRange(f64),
    /// Cell type never holds a date (booleans, error cells).
    NotADate(&'static str),
    /// Date parsed but the configured output format is invalid.
    InvalidOutputFormat(String),
}

impl fmt::Display for DateParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnrecognizedFormat => write!(f, "unrecognized date format"),
            Self::SerialOutOfRange(_) => {
                write!(f, "serial outside 1..={MAX_EXCEL_SERIAL}")
            }
            Self::NotADate(kind) => write!(f, "{kind} cell is not a date"),
            Self::InvalidOutputFormat(format) => write!(f, "invalid date format '{format}'"),
        }
    }
}

impl std::error::Error for DateParseError {}

/// Reads a cell as a calendar date.
pub fn parse_date(cell: &CellValue) -> Result<NaiveDate, DateParseError> {
    match cell {
        CellValue::DateTime(value) => Ok(value.date()),
        CellValue::String(value) => parse_date_str(value),
        CellValue::Int(value) => parse_serial(*value as f64),
        CellValue::Float(value) => parse_serial(*value),
        other => Err(DateParseError::NotADate(other.kind())),
    }
}

/// Parses free text as a date.
pub fn parse_date_str(value: &str) -> Result<NaiveDate, DateParseError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DateParseError::UnrecognizedFormat);
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.date_naive());
    }
    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(parsed.date());
        }
    }
    for format in DATE_FORMATS {
        if let Ok(parsed) = NaiveDate::parse_from_str(trimmed, format) {
            return Ok(parsed);
        }
    }
    // Compact YYYYMMDD.
    if trimmed.len() == 8 && trimmed.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(parsed) = NaiveDate::parse_from_str(trimmed, "%Y%m%d") {
            return Ok(parsed);
        }
    }
    Err(DateParseError::UnrecognizedFormat)
}

fn parse_serial(serial: f64) -> Result<NaiveDate, DateParseError> {
    excel_serial_to_datetime(serial)
        .map(|value| value.date())
        .ok_or(DateParseError::SerialOutOfRange(serial))
}

/// Renders a date with a chrono strftime format.
pub fn format_date(date: NaiveDate, format: &str) -> Result<String, DateParseError> {
    let mut rendered = String::new();
    write!(rendered, "{}", date.format(format))
        .map_err(|_| DateParseError::InvalidOutputFormat(format.to_string()))?;
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_iso_and_us_layouts() {
        assert_eq!(parse_date_str("2023-04-15"), Ok(ymd(2023, 4, 15)));
        assert_eq!(parse_date_str("2023/04/15"), Ok(ymd(2023, 4, 15)));
        assert_eq!(parse_date_str("04/15/2023"), Ok(ymd(2023, 4, 15)));
        assert_eq!(parse_date_str("4/5/2023"), Ok(ymd(2023, 4, 5)));
        assert_eq!(parse_date_str("04-15-2023"), Ok(ymd(2023, 4, 15)));
        assert_eq!(parse_date_str("15.04.2023"), Ok(ymd(2023, 4, 15)));
        assert_eq!(parse_date_str("20230415"), Ok(ymd(2023, 4, 15)));
    }

    #[test]
    fn parses_datetimes_and_drops_time() {
        assert_eq!(parse_date_str("2023-04-15 13:45:00"), Ok(ymd(2023, 4, 15)));
        assert_eq!(parse_date_str("2023-04-15T13:45:00.250"), Ok(ymd(2023, 4, 15)));
        assert_eq!(parse_date_str("2023-04-15T23:30:00-05:00"), Ok(ymd(2023, 4, 15)));
        assert_eq!(parse_date_str("04/15/2023 1:45 PM"), Ok(ymd(2023, 4, 15)));
    }

    #[test]
    fn parses_month_names() {
        assert_eq!(parse_date_str("April 15, 2023"), Ok(ymd(2023, 4, 15)));
        assert_eq!(parse_date_str("Apr 15, 2023"), Ok(ymd(2023, 4, 15)));
        assert_eq!(parse_date_str("15 April 2023"), Ok(ymd(2023, 4, 15)));
        assert_eq!(parse_date_str("15-Apr-2023"), Ok(ymd(2023, 4, 15)));
    }

    #[test]
    fn rejects_non_dates() {
        assert_eq!(
            parse_date_str("sometime in spring"),
            Err(DateParseError::UnrecognizedFormat)
        );
        assert_eq!(
            parse_date_str("2023-13-01"),
            Err(DateParseError::UnrecognizedFormat)
        );
        assert_eq!(
            parse_date(&CellValue::Bool(true)),
            Err(DateParseError::NotADate("bool"))
        );
        assert!(matches!(
            parse_date(&CellValue::Int(-4)),
            Err(DateParseError::SerialOutOfRange(_))
        ));
    }

    #[test]
    fn numeric_cells_are_excel_serials() {
        assert_eq!(parse_date(&CellValue::Int(45031)), Ok(ymd(2023, 4, 15)));
        assert_eq!(parse_date(&CellValue::Float(45031.75)), Ok(ymd(2023, 4, 15)));
    }

    #[test]
    fn formats_with_default_layout() {
        assert_eq!(
            format_date(ymd(2023, 4, 15), "%m/%d/%Y").as_deref(),
            Ok("04/15/2023")
        );
        assert!(format_date(ymd(2023, 4, 15), "%m/%d/%").is_err());
    }
}
