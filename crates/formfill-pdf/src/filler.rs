//! Per-record fill driver.

use std::path::{Path, PathBuf};

use formfill_map::{Resolution, ResolutionIssue, resolve_fields};
use formfill_model::{MappingProfile, Record};
use serde::Serialize;
use tracing::{debug, info, info_span};

use crate::apply::apply_fields;
use crate::document::{copy_structure, load_template, merge_form_metadata, persist};
use crate::error::Result;
use crate::naming::output_path_for;

/// Result of filling one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FillOutcome {
    /// 1-based data row index.
    pub row: usize,
    pub path: PathBuf,
    /// Assignments that matched a form field.
    pub applied: usize,
    /// Assigned identifiers with no form field.
    pub unmatched: Vec<String>,
    pub issues: Vec<ResolutionIssue>,
}

/// Fills one copy of a template per record.
///
/// The template is reloaded for every record; no document state is shared
/// between records.
#[derive(Debug, Clone)]
pub struct FormFiller {
    template: PathBuf,
    output_dir: PathBuf,
    profile: MappingProfile,
}

impl FormFiller {
    pub fn new(
        template: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        profile: MappingProfile,
    ) -> Self {
        Self {
            template: template.into(),
            output_dir: output_dir.into(),
            profile,
        }
    }

    #[must_use]
    pub fn template(&self) -> &Path {
        &self.template
    }

    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    #[must_use]
    pub fn profile(&self) -> &MappingProfile {
        &self.profile
    }

    /// Runs every stage for `record` and writes its output document.
    pub fn fill_record(&self, record: &Record) -> Result<FillOutcome> {
        let resolution = resolve_fields(record, &self.profile);
        self.fill_resolved(record, &resolution)
    }

    /// Runs the document stages with an already computed resolution.
    ///
    /// Callers that need the resolution issues even when the document cannot
    /// be written resolve first and keep the [`Resolution`].
    pub fn fill_resolved(&self, record: &Record, resolution: &Resolution) -> Result<FillOutcome> {
        let span = info_span!("fill_record", row = record.index());
        let _guard = span.enter();

        debug!(stage = "load_template", path = %self.template.display());
        let template = load_template(&self.template)?;

        debug!(stage = "copy_structure");
        let mut output = copy_structure(&template)?;

        debug!(stage = "merge_form_metadata");
        merge_form_metadata(&template, &mut output)?;
        drop(template);

        debug!(stage = "apply_fields", assignments = resolution.assignments.len());
        let summary = apply_fields(&mut output, &resolution.assignments)?;

        let path = output_path_for(record, &self.profile, &self.output_dir);
        debug!(stage = "persist", path = %path.display());
        persist(&mut output, &path)?;

        info!(
            path = %path.display(),
            applied = summary.applied,
            unmatched = summary.unmatched.len(),
            "document written"
        );
        Ok(FillOutcome {
            row: record.index(),
            path,
            applied: summary.applied,
            unmatched: summary.unmatched,
            issues: resolution.issues.clone(),
        })
    }
}
