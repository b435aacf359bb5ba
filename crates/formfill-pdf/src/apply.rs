//! Writing field assignments into a document's form fields.

use formfill_model::{CheckboxState, FieldAssignments};
use lopdf::{Document, Object};
use tracing::debug;

use crate::error::Result;
use crate::fields::{FieldType, FormField, collect_fields};
use crate::text::text_string;

/// What [`apply_fields`] did with an assignment set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplySummary {
    /// Assignments that matched at least one field.
    pub applied: usize,
    /// Identifiers with no matching field, in assignment order.
    pub unmatched: Vec<String>,
}

/// Sets every assigned value on the fields it names.
///
/// A field matches on its partial name or its fully qualified name, so one
/// identifier may set several fields. Unmatched identifiers are skipped.
pub fn apply_fields(document: &mut Document, assignments: &FieldAssignments) -> Result<ApplySummary> {
    let fields = collect_fields(document);
    let mut summary = ApplySummary::default();

    for (identifier, value) in assignments.iter() {
        let mut matched = false;
        for field in fields.iter().filter(|field| field.matches(identifier)) {
            match field.field_type {
                FieldType::Button => set_button(document, field, value)?,
                _ => set_text(document, field, value)?,
            }
            matched = true;
        }
        if matched {
            summary.applied += 1;
        } else {
            debug!(field = identifier, "no form field matches assignment");
            summary.unmatched.push(identifier.to_string());
        }
    }
    Ok(summary)
}

fn set_text(document: &mut Document, field: &FormField, value: &str) -> Result<()> {
    document
        .get_dictionary_mut(field.id)?
        .set("V", text_string(value));
    Ok(())
}

/// `/V` takes the state name; each widget shows that state when its normal
/// appearance offers it and `Off` otherwise.
fn set_button(document: &mut Document, field: &FormField, value: &str) -> Result<()> {
    let state = CheckboxState::parse(value);
    let name = state.state_name().as_bytes().to_vec();
    document
        .get_dictionary_mut(field.id)?
        .set("V", Object::Name(name.clone()));

    for widget in &field.widgets {
        let shown = match &state {
            CheckboxState::On(on) if widget.states.iter().any(|s| s == on) => name.clone(),
            _ => CheckboxState::OFF.as_bytes().to_vec(),
        };
        document
            .get_dictionary_mut(widget.id)?
            .set("AS", Object::Name(shown));
    }
    Ok(())
}
