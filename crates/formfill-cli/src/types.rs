use std::path::PathBuf;

use formfill_map::ResolutionIssue;

#[derive(Debug)]
pub struct RunReport {
    pub input: PathBuf,
    pub sheet: Option<String>,
    pub template: PathBuf,
    pub output_dir: PathBuf,
    pub dry_run: bool,
    pub rows: Vec<RowReport>,
}

impl RunReport {
    /// Documents written (or, in a dry run, planned).
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| !matches!(row.status, RowStatus::Failed(_)))
            .count()
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.rows.len() - self.succeeded()
    }

    #[must_use]
    pub fn issue_count(&self) -> usize {
        self.rows.iter().map(|row| row.issues.len()).sum()
    }

    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }
}

#[derive(Debug)]
pub struct RowReport {
    /// 1-based data row index.
    pub row: usize,
    pub path: PathBuf,
    pub status: RowStatus,
    pub applied: usize,
    pub unmatched: Vec<String>,
    pub issues: Vec<ResolutionIssue>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowStatus {
    Written,
    /// Dry run: resolved, nothing written.
    Planned,
    Failed(String),
}
