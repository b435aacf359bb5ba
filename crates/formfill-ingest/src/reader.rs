//! Input format detection and dispatch.

use std::path::Path;

use tracing::{debug, info};

use crate::csv_reader::read_csv;
use crate::error::{IngestError, Result};
use crate::table::RecordTable;
use crate::workbook::read_workbook;

/// Number of records previewed at debug level after loading.
const PREVIEW_ROWS: usize = 5;

/// Supported input formats, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Any workbook calamine understands (xlsx, xlsm, xlsb, xls, ods).
    Workbook,
    Csv,
}

impl InputFormat {
    /// Detects the format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "xla" | "ods" => Ok(Self::Workbook),
            "csv" => Ok(Self::Csv),
            _ => Err(IngestError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension,
            }),
        }
    }
}

/// Reads the input table.
///
/// `sheet` selects a worksheet by name for workbook inputs and is ignored for
/// CSV. The first row is the header row.
///
/// # Errors
///
/// Fails when the file is missing, has an unsupported extension, or cannot be
/// parsed. All of these abort the run.
pub fn read_table(path: &Path, sheet: Option<&str>) -> Result<RecordTable> {
    if !path.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let table = match InputFormat::from_path(path)? {
        InputFormat::Workbook => read_workbook(path, sheet)?,
        InputFormat::Csv => read_csv(path)?,
    };
    info!(
        path = %path.display(),
        sheet = table.sheet().unwrap_or("-"),
        rows = table.len(),
        columns = table.headers().len(),
        "input table loaded"
    );
    preview(&table);
    Ok(table)
}

/// Logs which columns the first records populate. Cell values stay out of the
/// log.
fn preview(table: &RecordTable) {
    for record in table.records().iter().take(PREVIEW_ROWS) {
        let populated: Vec<&str> = record
            .iter()
            .filter(|(_, cell)| !cell.is_missing())
            .map(|(column, _)| column)
            .collect();
        debug!(row = record.index(), columns = ?populated, "record preview");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_formats_by_extension() {
        assert_eq!(
            InputFormat::from_path(Path::new("PDF Source.xlsx")).unwrap(),
            InputFormat::Workbook
        );
        assert_eq!(
            InputFormat::from_path(Path::new("legacy.XLS")).unwrap(),
            InputFormat::Workbook
        );
        assert_eq!(
            InputFormat::from_path(Path::new("rows.csv")).unwrap(),
            InputFormat::Csv
        );
        assert!(matches!(
            InputFormat::from_path(Path::new("notes.txt")),
            Err(IngestError::UnsupportedFormat { ref extension, .. }) if extension == "txt"
        ));
    }
}
