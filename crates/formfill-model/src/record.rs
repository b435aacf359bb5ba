//! One input row keyed by column name.

use std::sync::Arc;

use crate::cell::CellValue;

/// A single spreadsheet row.
///
/// Headers are shared between all records of a table. The index is 1-based
/// and counts data rows only (the header row is not counted).
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    index: usize,
    headers: Arc<[String]>,
    values: Vec<CellValue>,
}

impl Record {
    /// Builds a record, padding short rows with [`CellValue::Empty`] and
    /// dropping values beyond the last header.
    #[must_use]
    pub fn new(index: usize, headers: Arc<[String]>, mut values: Vec<CellValue>) -> Self {
        values.resize(headers.len(), CellValue::Empty);
        Self {
            index,
            headers,
            values,
        }
    }

    /// Builds a standalone record from (column, value) pairs.
    pub fn from_pairs<K, V, I>(index: usize, pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<CellValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        let (headers, values): (Vec<String>, Vec<CellValue>) = pairs
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .unzip();
        Self::new(index, headers.into(), values)
    }

    /// 1-based data row index.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn contains(&self, column: &str) -> bool {
        self.position(column).is_some()
    }

    /// Cell for `column`, or `None` when the table has no such column.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.position(column).map(|idx| &self.values[idx])
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.headers.iter().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.columns().zip(self.values.iter())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// True when every cell in the row is missing.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.values.iter().all(CellValue::is_missing)
    }

    fn position(&self, column: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == column)
    }
}
