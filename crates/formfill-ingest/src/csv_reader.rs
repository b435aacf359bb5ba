//! CSV reading.

use std::path::Path;

use csv::ReaderBuilder;
use formfill_model::CellValue;

use crate::error::{IngestError, Result};
use crate::header::build_headers;
use crate::table::RecordTable;

/// Reads a CSV file with a single header row.
///
/// Cells stay textual; only blank cells are mapped to [`CellValue::Empty`].
pub(crate) fn read_csv(path: &Path) -> Result<RecordTable> {
    let csv_error = |source| IngestError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(csv_error)?;
    let headers = build_headers(reader.headers().map_err(csv_error)?.iter().map(String::from));

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        rows.push(record.iter().map(convert_cell).collect::<Vec<_>>());
    }
    Ok(RecordTable::from_rows(path, None, headers, rows))
}

fn convert_cell(raw: &str) -> CellValue {
    let value = raw.trim_matches('\u{feff}');
    if value.trim().is_empty() {
        CellValue::Empty
    } else {
        CellValue::String(value.to_string())
    }
}
