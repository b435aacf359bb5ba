//! Error types for template loading and document output.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while filling or inspecting a PDF form.
#[derive(Debug, Error)]
pub enum FillError {
    /// Template is missing or cannot be parsed.
    #[error("failed to load template {path}: {source}")]
    TemplateLoad {
        path: PathBuf,
        #[source]
        source: lopdf::Error,
    },

    /// Template parsed but lacks a required structure.
    #[error("malformed template: {message}")]
    MalformedTemplate { message: &'static str },

    /// Object lookup or edit failed while building the output document.
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// Output directory could not be created.
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Output document could not be written.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FillError {
    /// True when the error comes from the template itself, so every later
    /// record would fail the same way.
    #[must_use]
    pub fn is_template_error(&self) -> bool {
        matches!(
            self,
            Self::TemplateLoad { .. } | Self::MalformedTemplate { .. }
        )
    }
}

/// Result type for fill operations.
pub type Result<T> = std::result::Result<T, FillError>;
