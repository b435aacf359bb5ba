//! Data model for spreadsheet-to-PDF form filling.
//!
//! - [`CellValue`] and [`Record`]: one spreadsheet row as read from disk
//! - [`FieldMappingTable`], [`CheckboxMappingTable`], [`DateFieldSet`]: the
//!   static tables that say where each column lands on the form
//! - [`FieldAssignments`]: the per-record field → value set applied to one
//!   output document
//! - [`MappingProfile`]: the tables plus output naming, loadable from TOML
//! - [`redact_value`]: keeps cell values out of logs unless enabled

mod cell;
mod error;
mod mapping;
mod profile;
mod record;
mod redact;

// === Error Types ===
pub use error::{ModelError, Result};

// === Cells and Records ===
pub use cell::{CellValue, MAX_EXCEL_SERIAL, excel_serial_to_datetime};
pub use record::Record;

// === Mapping Tables ===
pub use mapping::{
    CheckboxMappingTable, CheckboxOption, CheckboxState, DateFieldSet, FieldAssignments,
    FieldMappingTable,
};

// === Profiles ===
pub use profile::{
    DEFAULT_DATE_FORMAT, DEFAULT_EXTENSION, DEFAULT_FALLBACK_STEM, DEFAULT_FILENAME_COLUMN,
    MappingProfile,
};

// === Log Redaction ===
pub use redact::{REDACTED_VALUE, log_data_enabled, redact_value, set_log_data};
