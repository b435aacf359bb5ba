//! Fill run pipeline with explicit stages.
//!
//! The pipeline follows these stages in order:
//! 1. **Ingest**: read the spreadsheet into records
//! 2. **Fill**: per record, resolve fields and write one document
//!    (or, in a dry run, resolve only)
//!
//! Input and template problems abort the run. Any other per-row failure is
//! recorded against its row and the run continues, unless `fail_fast` is set.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{error, info, info_span, trace};

use formfill_ingest::{RecordTable, read_table};
use formfill_map::resolve_fields;
use formfill_model::{MappingProfile, Record};
use formfill_pdf::{FormFiller, output_path_for};

use crate::logging::redact_value;
use crate::types::{RowReport, RowStatus, RunReport};

/// Everything a fill run needs.
#[derive(Debug, Clone)]
pub struct FillOptions {
    pub input: PathBuf,
    /// Worksheet name; the first sheet when `None`.
    pub sheet: Option<String>,
    pub template: PathBuf,
    pub output_dir: PathBuf,
    pub profile: MappingProfile,
    /// Abort on the first row that fails instead of continuing.
    pub fail_fast: bool,
    /// Resolve rows without loading the template or writing files.
    pub dry_run: bool,
}

/// Runs ingest then fill (or plan, for dry runs).
pub fn run_pipeline(options: &FillOptions) -> Result<RunReport> {
    let table = ingest(&options.input, options.sheet.as_deref())?;
    let sheet = table.sheet().map(str::to_string);
    let records: Vec<Record> = table.into_records().collect();

    let fill_start = Instant::now();
    let rows = if options.dry_run {
        plan_records(&records, options)
    } else {
        fill_records(&records, options)?
    };

    let report = RunReport {
        input: options.input.clone(),
        sheet,
        template: options.template.clone(),
        output_dir: options.output_dir.clone(),
        dry_run: options.dry_run,
        rows,
    };
    info!(
        records = report.rows.len(),
        succeeded = report.succeeded(),
        failed = report.failed(),
        issues = report.issue_count(),
        dry_run = options.dry_run,
        duration_ms = fill_start.elapsed().as_millis(),
        "fill complete"
    );
    Ok(report)
}

// ============================================================================
// Stage 1: Ingest
// ============================================================================

/// Reads the input spreadsheet.
pub fn ingest(input: &Path, sheet: Option<&str>) -> Result<RecordTable> {
    let span = info_span!("ingest", input = %input.display());
    let _guard = span.enter();
    let start = Instant::now();

    let table = read_table(input, sheet)
        .with_context(|| format!("read input {}", input.display()))?;
    info!(
        sheet = table.sheet().unwrap_or("-"),
        columns = table.headers().len(),
        records = table.len(),
        duration_ms = start.elapsed().as_millis(),
        "ingest complete"
    );
    Ok(table)
}

// ============================================================================
// Stage 2: Fill
// ============================================================================

/// Fills one document per record.
///
/// Template errors abort immediately since every later row would fail the
/// same way.
pub fn fill_records(records: &[Record], options: &FillOptions) -> Result<Vec<RowReport>> {
    let filler = FormFiller::new(
        &options.template,
        &options.output_dir,
        options.profile.clone(),
    );
    let mut rows = Vec::with_capacity(records.len());

    for record in records {
        let resolution = resolve_fields(record, &options.profile);
        match filler.fill_resolved(record, &resolution) {
            Ok(outcome) => rows.push(RowReport {
                row: outcome.row,
                path: outcome.path,
                status: RowStatus::Written,
                applied: outcome.applied,
                unmatched: outcome.unmatched,
                issues: outcome.issues,
            }),
            Err(err) if err.is_template_error() => {
                return Err(err).context("load template");
            }
            Err(err) => {
                let path = output_path_for(record, &options.profile, &options.output_dir);
                error!(
                    row = record.index(),
                    path = %path.display(),
                    error = %err,
                    "failed to fill document"
                );
                if options.fail_fast {
                    return Err(err).with_context(|| format!("row {}", record.index()));
                }
                rows.push(RowReport {
                    row: record.index(),
                    path,
                    status: RowStatus::Failed(err.to_string()),
                    applied: 0,
                    unmatched: Vec::new(),
                    issues: resolution.issues,
                });
            }
        }
    }
    Ok(rows)
}

/// Resolves every record and reports where its document would go.
pub fn plan_records(records: &[Record], options: &FillOptions) -> Vec<RowReport> {
    records
        .iter()
        .map(|record| {
            let span = info_span!("plan_record", row = record.index());
            let _guard = span.enter();

            let resolution = resolve_fields(record, &options.profile);
            for (field, value) in resolution.assignments.iter() {
                trace!(field, value = redact_value(value), "resolved field");
            }
            let path = output_path_for(record, &options.profile, &options.output_dir);
            info!(path = %path.display(), "document planned");
            RowReport {
                row: record.index(),
                path,
                status: RowStatus::Planned,
                applied: resolution.assignments.len(),
                unmatched: Vec::new(),
                issues: resolution.issues,
            }
        })
        .collect()
}
