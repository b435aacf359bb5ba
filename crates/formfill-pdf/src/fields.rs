//! AcroForm field tree traversal.

use std::collections::BTreeSet;
use std::fmt;

use lopdf::{Dictionary, Document, Object, ObjectId};
use serde::Serialize;

use crate::text::{decode_text, name_text};

/// Form field type (`/FT`), inherited from ancestors when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum FieldType {
    #[serde(rename = "Tx")]
    Text,
    #[serde(rename = "Btn")]
    Button,
    #[serde(rename = "Ch")]
    Choice,
    #[serde(rename = "Sig")]
    Signature,
    #[serde(rename = "unknown")]
    Unknown,
}

impl FieldType {
    fn from_name(name: &[u8]) -> Self {
        match name {
            b"Tx" => Self::Text,
            b"Btn" => Self::Button,
            b"Ch" => Self::Choice,
            b"Sig" => Self::Signature,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "Tx",
            Self::Button => "Btn",
            Self::Choice => "Ch",
            Self::Signature => "Sig",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A widget annotation and the normal appearance states it offers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Widget {
    pub(crate) id: ObjectId,
    pub(crate) states: Vec<String>,
}

/// A terminal form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FormField {
    pub(crate) id: ObjectId,
    pub(crate) qualified_name: String,
    pub(crate) partial_name: String,
    pub(crate) field_type: FieldType,
    pub(crate) flags: i64,
    pub(crate) value: Option<String>,
    pub(crate) widgets: Vec<Widget>,
}

impl FormField {
    /// Matches on the partial name or the fully qualified name.
    pub(crate) fn matches(&self, identifier: &str) -> bool {
        self.partial_name == identifier || self.qualified_name == identifier
    }

    /// Distinct appearance states across all widgets, sorted.
    pub(crate) fn states(&self) -> Vec<String> {
        self.widgets
            .iter()
            .flat_map(|widget| widget.states.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

#[derive(Default)]
struct Inherited {
    qualified_name: Option<String>,
    field_type: Option<FieldType>,
    flags: Option<i64>,
}

/// Follows a reference to the object it points at.
pub(crate) fn resolve<'a>(doc: &'a Document, object: &'a Object) -> Option<&'a Object> {
    doc.dereference(object).ok().map(|(_, target)| target)
}

/// The catalog's `/AcroForm` dictionary, if any.
pub(crate) fn form_dictionary(doc: &Document) -> Option<&Dictionary> {
    let acro_form = doc.catalog().ok()?.get(b"AcroForm").ok()?;
    resolve(doc, acro_form)?.as_dict().ok()
}

/// Every terminal field reachable from `/AcroForm /Fields`, in tree order.
pub(crate) fn collect_fields(doc: &Document) -> Vec<FormField> {
    let Some(roots) = form_dictionary(doc)
        .and_then(|form| form.get(b"Fields").ok())
        .and_then(|fields| resolve(doc, fields))
        .and_then(|fields| fields.as_array().ok())
    else {
        return Vec::new();
    };

    let mut fields = Vec::new();
    let mut visited = BTreeSet::new();
    for root in roots {
        if let Ok(id) = root.as_reference() {
            walk(doc, id, &Inherited::default(), &mut visited, &mut fields);
        }
    }
    fields
}

fn walk(
    doc: &Document,
    id: ObjectId,
    parent: &Inherited,
    visited: &mut BTreeSet<ObjectId>,
    out: &mut Vec<FormField>,
) {
    if !visited.insert(id) {
        return;
    }
    let Ok(dict) = doc.get_dictionary(id) else {
        return;
    };

    let partial_name = dict
        .get(b"T")
        .ok()
        .and_then(|t| t.as_str().ok())
        .map(decode_text);
    let qualified_name = match (&parent.qualified_name, &partial_name) {
        (Some(prefix), Some(name)) => Some(format!("{prefix}.{name}")),
        (None, Some(name)) => Some(name.clone()),
        (prefix, None) => prefix.clone(),
    };
    let here = Inherited {
        qualified_name,
        field_type: dict
            .get(b"FT")
            .ok()
            .and_then(|ft| ft.as_name().ok())
            .map(FieldType::from_name)
            .or_else(|| parent.field_type.clone()),
        flags: dict
            .get(b"Ff")
            .ok()
            .and_then(|ff| ff.as_i64().ok())
            .or(parent.flags),
    };

    let kids = kid_ids(doc, dict);
    let (child_fields, widget_ids): (Vec<ObjectId>, Vec<ObjectId>) = kids
        .into_iter()
        .partition(|kid| doc.get_dictionary(*kid).is_ok_and(|k| k.has(b"T")));

    for child in child_fields.iter().copied() {
        walk(doc, child, &here, visited, out);
    }
    if !child_fields.is_empty() && widget_ids.is_empty() {
        return;
    }

    let (Some(qualified_name), Some(partial_name)) = (here.qualified_name, partial_name) else {
        return;
    };
    let widget_ids = if widget_ids.is_empty() {
        vec![id]
    } else {
        widget_ids
    };
    out.push(FormField {
        id,
        qualified_name,
        partial_name,
        field_type: here.field_type.unwrap_or(FieldType::Unknown),
        flags: here.flags.unwrap_or(0),
        value: dict.get(b"V").ok().and_then(|v| display_value(doc, v)),
        widgets: widget_ids
            .into_iter()
            .map(|widget| Widget {
                id: widget,
                states: appearance_states(doc, widget),
            })
            .collect(),
    });
}

fn kid_ids(doc: &Document, dict: &Dictionary) -> Vec<ObjectId> {
    dict.get(b"Kids")
        .ok()
        .and_then(|kids| resolve(doc, kids))
        .and_then(|kids| kids.as_array().ok())
        .map(|kids| kids.iter().filter_map(|kid| kid.as_reference().ok()).collect())
        .unwrap_or_default()
}

/// Keys of the widget's `/AP /N` dictionary.
fn appearance_states(doc: &Document, widget: ObjectId) -> Vec<String> {
    let Some(normal) = doc
        .get_dictionary(widget)
        .ok()
        .and_then(|w| w.get(b"AP").ok())
        .and_then(|ap| resolve(doc, ap))
        .and_then(|ap| ap.as_dict().ok())
        .and_then(|ap| ap.get(b"N").ok())
        .and_then(|n| resolve(doc, n))
        .and_then(|n| n.as_dict().ok())
    else {
        return Vec::new();
    };
    normal.iter().map(|(key, _)| name_text(key)).collect()
}

fn display_value(doc: &Document, value: &Object) -> Option<String> {
    match resolve(doc, value)? {
        Object::String(bytes, _) => Some(decode_text(bytes)),
        Object::Name(name) => Some(format!("/{}", name_text(name))),
        Object::Integer(number) => Some(number.to_string()),
        Object::Real(number) => Some(number.to_string()),
        Object::Boolean(flag) => Some(flag.to_string()),
        Object::Array(items) => {
            let parts: Vec<String> = items
                .iter()
                .filter_map(|item| display_value(doc, item))
                .collect();
            Some(parts.join(", "))
        }
        _ => None,
    }
}
