//! Error types for mapping profiles.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading, saving or validating a mapping profile.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Failed to read or write a profile file.
    #[error("failed to access profile {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Profile file is not valid TOML or does not match the profile layout.
    #[error("failed to parse profile {path}: {source}")]
    TomlParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Profile could not be rendered as TOML.
    #[error("failed to serialize profile: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // === Validation Errors ===
    /// Two columns target the same form field.
    #[error("field '{field}' is mapped by both '{first}' and '{second}'")]
    DuplicateField {
        field: String,
        first: String,
        second: String,
    },

    /// Checkbox option key is not in normalized (trimmed, lowercase) form.
    #[error("checkbox option '{option}' for column '{column}' must be trimmed and lowercase")]
    OptionNotNormalized { column: String, option: String },

    /// Checkbox option has no fields to set.
    #[error("checkbox option '{option}' for column '{column}' sets no fields")]
    EmptyOption { column: String, option: String },

    /// Output extension is empty.
    #[error("output extension must not be empty")]
    EmptyExtension,

    /// Date format is not a valid strftime pattern.
    #[error("invalid date format '{0}'")]
    InvalidDateFormat(String),

    /// Fallback file stem is empty.
    #[error("fallback file stem must not be empty")]
    EmptyFallbackStem,
}

impl ModelError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
