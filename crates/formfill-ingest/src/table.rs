//! In-memory record table.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use formfill_model::{CellValue, Record};

/// Rows of one input sheet, keyed by the header row.
#[derive(Debug, Clone)]
pub struct RecordTable {
    source: PathBuf,
    sheet: Option<String>,
    headers: Arc<[String]>,
    records: Vec<Record>,
}

impl RecordTable {
    /// Builds a table from a header row and raw data rows.
    ///
    /// Rows are numbered from 1 by their position under the header row, then
    /// blank rows are dropped. A blank row still uses up its number.
    pub(crate) fn from_rows(
        source: &Path,
        sheet: Option<String>,
        headers: Vec<String>,
        rows: impl IntoIterator<Item = Vec<CellValue>>,
    ) -> Self {
        let headers: Arc<[String]> = headers.into();
        let records = rows
            .into_iter()
            .enumerate()
            .filter(|(_, row)| !row.iter().all(CellValue::is_missing))
            .map(|(idx, row)| Record::new(idx + 1, Arc::clone(&headers), row))
            .collect();
        Self {
            source: source.to_path_buf(),
            sheet,
            headers,
            records,
        }
    }

    /// File the table was read from.
    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Worksheet name, for workbook inputs.
    #[must_use]
    pub fn sheet(&self) -> Option<&str> {
        self.sheet.as_deref()
    }

    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|header| header == column)
    }

    /// Consumes the table, yielding records in row order.
    pub fn into_records(self) -> impl Iterator<Item = Record> {
        self.records.into_iter()
    }
}
