//! Non-fatal problems found while resolving a record.

use std::fmt;

use formfill_model::redact_value;
use serde::Serialize;

/// A per-field problem; the record is still filled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolutionIssue {
    /// Regular field column absent from the input; field left at template default.
    MissingColumn { column: String },
    /// Checkbox column absent from the input; group left at template default.
    MissingCheckboxColumn { column: String },
    /// Date column value could not be parsed; plain string form used.
    UnparseableDate {
        column: String,
        value: String,
        reason: String,
    },
    /// Checkbox value has no option entry; group left untouched.
    UnrecognizedCheckboxValue { column: String, value: String },
}

impl ResolutionIssue {
    /// Column the issue refers to.
    #[must_use]
    pub fn column(&self) -> &str {
        match self {
            Self::MissingColumn { column }
            | Self::MissingCheckboxColumn { column }
            | Self::UnparseableDate { column, .. }
            | Self::UnrecognizedCheckboxValue { column, .. } => column,
        }
    }

    /// Cell value the issue carries, if any.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::UnparseableDate { value, .. } | Self::UnrecognizedCheckboxValue { value, .. } => {
                Some(value)
            }
            Self::MissingColumn { .. } | Self::MissingCheckboxColumn { .. } => None,
        }
    }

    /// Display form with the cell value passed through [`redact_value`], for
    /// log events.
    #[must_use]
    pub fn redacted(&self) -> Redacted<'_> {
        Redacted(self)
    }

    fn render(&self, f: &mut fmt::Formatter<'_>, shown: &str) -> fmt::Result {
        match self {
            Self::MissingColumn { column } => {
                write!(f, "field '{column}' not found in input columns")
            }
            Self::MissingCheckboxColumn { column } => {
                write!(f, "checkbox field '{column}' not found in input columns")
            }
            Self::UnparseableDate { column, reason, .. } => {
                write!(f, "date parsing failed for '{shown}' in '{column}': {reason}")
            }
            Self::UnrecognizedCheckboxValue { column, .. } => {
                write!(f, "unrecognized checkbox value '{shown}' for field '{column}'")
            }
        }
    }

    /// Short machine-friendly label.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MissingColumn { .. } => "missing_column",
            Self::MissingCheckboxColumn { .. } => "missing_checkbox_column",
            Self::UnparseableDate { .. } => "unparseable_date",
            Self::UnrecognizedCheckboxValue { .. } => "unrecognized_checkbox_value",
        }
    }
}

impl fmt::Display for ResolutionIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, self.value().unwrap_or_default())
    }
}

/// [`ResolutionIssue`] rendered with its cell value redacted unless value
/// logging is enabled.
pub struct Redacted<'a>(&'a ResolutionIssue);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown = self.0.value().map(redact_value).unwrap_or_default();
        self.0.render(f, shown)
    }
}
