//! Spreadsheet ingestion for form filling.
//!
//! Reads the input table (first worksheet of an xlsx/xls/ods workbook, or a
//! CSV file) into [`RecordTable`]: a header row plus one
//! [`formfill_model::Record`] per non-blank data row.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use formfill_ingest::read_table;
//!
//! let table = read_table(Path::new("PDF Source.xlsx"), None)?;
//! for record in table.into_records() {
//!     println!("row {}", record.index());
//! }
//! ```

mod csv_reader;
mod error;
mod header;
mod reader;
mod table;
mod workbook;

// === Error Types ===
pub use error::{IngestError, Result};

// === Reading ===
pub use reader::{InputFormat, read_table};
pub use table::RecordTable;
