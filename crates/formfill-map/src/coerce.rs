//! Per-cell value coercion.

use formfill_model::CellValue;

use crate::date::{DateParseError, format_date, parse_date};

/// Plain string form of a cell; missing cells become `""`.
#[must_use]
pub fn plain_string(cell: &CellValue) -> String {
    if cell.is_missing() {
        String::new()
    } else {
        cell.to_string()
    }
}

/// Lookup key for checkbox options: trimmed, lowercased plain form.
#[must_use]
pub fn normalize_option(cell: &CellValue) -> String {
    plain_string(cell).trim().to_lowercase()
}

/// Result of coercing a date cell.
#[derive(Debug, Clone, PartialEq)]
pub enum DateCoercion {
    /// Parsed and rendered in the configured format.
    Formatted(String),
    /// Could not be read as a date; carries the plain string fallback.
    Fallback {
        value: String,
        error: DateParseError,
    },
}

impl DateCoercion {
    /// Final field value, whichever branch was taken.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Formatted(value) | Self::Fallback { value, .. } => value,
        }
    }

    #[must_use]
    pub fn into_value(self) -> String {
        match self {
            Self::Formatted(value) | Self::Fallback { value, .. } => value,
        }
    }
}

/// Coerces a non-missing date cell, falling back to its plain string form.
#[must_use]
pub fn coerce_date(cell: &CellValue, format: &str) -> DateCoercion {
    match parse_date(cell).and_then(|date| format_date(date, format)) {
        Ok(rendered) => DateCoercion::Formatted(rendered),
        Err(error) => DateCoercion::Fallback {
            value: plain_string(cell),
            error,
        },
    }
}
