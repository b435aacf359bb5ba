//! Record → field assignment resolution.

use formfill_model::{
    CheckboxMappingTable, FieldAssignments, FieldMappingTable, MappingProfile, Record,
};
use serde::Serialize;
use tracing::warn;

use crate::coerce::{DateCoercion, coerce_date, normalize_option, plain_string};
use crate::issue::ResolutionIssue;

/// Assignments for one record plus the issues met while building them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub assignments: FieldAssignments,
    pub issues: Vec<ResolutionIssue>,
}

impl Resolution {
    #[must_use]
    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }
}

/// Resolves every mapped column of `record` into field assignments.
///
/// Regular fields are resolved first, then checkbox groups; on identifier
/// collisions the later write wins. Missing columns, unknown checkbox values
/// and unparseable dates are recorded as issues (and logged as warnings) and
/// never abort the record.
#[must_use]
pub fn resolve_fields(record: &Record, profile: &MappingProfile) -> Resolution {
    let mut resolution = Resolution::default();
    resolve_regular_fields(record, &profile.fields, profile, &mut resolution);
    resolve_checkbox_fields(record, &profile.checkboxes, &mut resolution);
    resolution
}

fn resolve_regular_fields(
    record: &Record,
    fields: &FieldMappingTable,
    profile: &MappingProfile,
    resolution: &mut Resolution,
) {
    for (column, field) in fields {
        let Some(cell) = record.get(column) else {
            report(
                record,
                resolution,
                ResolutionIssue::MissingColumn {
                    column: column.clone(),
                },
            );
            continue;
        };

        let value = if cell.is_missing() {
            String::new()
        } else if profile.is_date_field(column) {
            match coerce_date(cell, &profile.date_format) {
                DateCoercion::Formatted(value) => value,
                DateCoercion::Fallback { value, error } => {
                    report(
                        record,
                        resolution,
                        ResolutionIssue::UnparseableDate {
                            column: column.clone(),
                            value: value.clone(),
                            reason: error.to_string(),
                        },
                    );
                    value
                }
            }
        } else {
            plain_string(cell)
        };
        resolution.assignments.insert(field.clone(), value);
    }
}

fn resolve_checkbox_fields(
    record: &Record,
    checkboxes: &CheckboxMappingTable,
    resolution: &mut Resolution,
) {
    for (column, options) in checkboxes {
        let Some(cell) = record.get(column) else {
            report(
                record,
                resolution,
                ResolutionIssue::MissingCheckboxColumn {
                    column: column.clone(),
                },
            );
            continue;
        };

        let key = normalize_option(cell);
        match options.get(&key) {
            Some(targets) => resolution.assignments.merge(targets),
            None => report(
                record,
                resolution,
                ResolutionIssue::UnrecognizedCheckboxValue {
                    column: column.clone(),
                    value: plain_string(cell),
                },
            ),
        }
    }
}

fn report(record: &Record, resolution: &mut Resolution, issue: ResolutionIssue) {
    warn!(
        row = record.index(),
        issue = issue.code(),
        column = issue.column(),
        "{}",
        issue.redacted()
    );
    resolution.issues.push(issue);
}
