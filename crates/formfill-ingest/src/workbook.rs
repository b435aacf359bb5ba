//! Workbook reading (xlsx, xlsm, xlsb, xls, ods) through calamine.

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use chrono::{NaiveDate, NaiveDateTime};
use formfill_model::{CellValue, excel_serial_to_datetime};
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::header::build_headers;
use crate::table::RecordTable;

/// Largest float that converts to an integer without losing precision.
const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

/// Reads one worksheet; the first one when `sheet` is `None`.
pub(crate) fn read_workbook(path: &Path, sheet: Option<&str>) -> Result<RecordTable> {
    let mut workbook = open_workbook_auto(path).map_err(|source| IngestError::Workbook {
        path: path.to_path_buf(),
        source,
    })?;
    let names = workbook.sheet_names();
    let sheet_name = match sheet {
        Some(requested) => names
            .iter()
            .find(|name| name.as_str() == requested)
            .cloned()
            .ok_or_else(|| IngestError::SheetNotFound {
                path: path.to_path_buf(),
                sheet: requested.to_string(),
                available: names.join(", "),
            })?,
        None => names
            .first()
            .cloned()
            .ok_or_else(|| IngestError::NoWorksheets {
                path: path.to_path_buf(),
            })?,
    };
    debug!(path = %path.display(), sheet = %sheet_name, "reading worksheet");

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|source| IngestError::Workbook {
            path: path.to_path_buf(),
            source,
        })?;

    let mut rows = range.rows();
    let headers = match rows.next() {
        Some(header_row) => build_headers(header_row.iter().map(|cell| convert_cell(cell).to_string())),
        None => Vec::new(),
    };
    let data_rows: Vec<Vec<CellValue>> = rows
        .map(|row| row.iter().map(convert_cell).collect())
        .collect();
    Ok(RecordTable::from_rows(
        path,
        Some(sheet_name),
        headers,
        data_rows,
    ))
}

/// Maps a calamine cell onto the model's cell type.
pub(crate) fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(value) if value.trim().is_empty() => CellValue::Empty,
        Data::String(value) => CellValue::String(value.clone()),
        Data::Int(value) => CellValue::Int(*value),
        Data::Float(value) => convert_float(*value),
        Data::Bool(value) => CellValue::Bool(*value),
        Data::DateTime(value) if value.is_duration() => convert_float(value.as_f64()),
        Data::DateTime(value) => excel_serial_to_datetime(value.as_f64())
            .map_or_else(|| convert_float(value.as_f64()), CellValue::DateTime),
        Data::DateTimeIso(value) => parse_iso(value)
            .map_or_else(|| CellValue::String(value.clone()), CellValue::DateTime),
        Data::DurationIso(value) => CellValue::String(value.clone()),
        Data::Error(error) => CellValue::Error(error.to_string()),
    }
}

/// Spreadsheets store every number as a float; whole values become integers.
fn convert_float(value: f64) -> CellValue {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < MAX_EXACT_INT {
        CellValue::Int(value as i64)
    } else {
        CellValue::Float(value)
    }
}

fn parse_iso(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .map(|date| date.and_time(chrono::NaiveTime::MIN))
        })
}
