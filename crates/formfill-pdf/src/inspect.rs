//! Listing a template's form fields.
//!
//! Used to discover the field identifiers a mapping profile should target.

use std::path::Path;

use lopdf::Document;
use serde::Serialize;
use tracing::{debug, info};

use crate::document::load_template;
use crate::error::Result;
use crate::fields::{FieldType, collect_fields, form_dictionary};

/// Shown for fields without a `/V` entry.
pub const NO_VALUE: &str = "No value set";

/// One terminal form field as found in a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldInfo {
    /// Dot-joined partial names from the root field down.
    pub qualified_name: String,
    /// The field's own `/T`.
    pub partial_name: String,
    pub field_type: FieldType,
    /// `/Ff` bits, inherited when absent.
    pub flags: i64,
    /// Normal appearance states offered by the widgets (buttons).
    pub states: Vec<String>,
    /// Current value, or [`NO_VALUE`].
    pub value: String,
}

/// Loads `template` and lists its fields.
pub fn list_fields(template: &Path) -> Result<Vec<FieldInfo>> {
    let document = load_template(template)?;
    let fields = inspect_document(&document);
    debug!(path = %template.display(), fields = fields.len(), "inspected template");
    Ok(fields)
}

/// Lists the fields of an already loaded document.
#[must_use]
pub fn inspect_document(document: &Document) -> Vec<FieldInfo> {
    if form_dictionary(document).is_none() {
        info!("No form fields found");
        return Vec::new();
    }
    collect_fields(document)
        .into_iter()
        .map(|field| FieldInfo {
            states: field.states(),
            value: field.value.unwrap_or_else(|| NO_VALUE.to_string()),
            qualified_name: field.qualified_name,
            partial_name: field.partial_name,
            field_type: field.field_type,
            flags: field.flags,
        })
        .collect()
}
