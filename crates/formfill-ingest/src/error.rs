//! Error types for spreadsheet ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading the input table.
///
/// Every variant is fatal for a run: no document is produced when the input
/// cannot be read.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input file does not exist.
    #[error("input file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Extension is not one of the supported spreadsheet formats.
    #[error("unsupported input format '{extension}' for {path}")]
    UnsupportedFormat { path: PathBuf, extension: String },

    // === Workbook Errors ===
    /// calamine could not open or parse the workbook.
    #[error("failed to read workbook {path}: {source}")]
    Workbook {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    /// Workbook contains no worksheets.
    #[error("workbook has no worksheets: {path}")]
    NoWorksheets { path: PathBuf },

    /// Requested worksheet is not in the workbook.
    #[error("worksheet '{sheet}' not found in {path} (available: {available})")]
    SheetNotFound {
        path: PathBuf,
        sheet: String,
        available: String,
    },

    // === CSV Errors ===
    /// CSV reader failed.
    #[error("failed to read CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
