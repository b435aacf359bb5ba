//! Column → form field mapping tables and per-record assignment sets.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Column name → form field identifier.
pub type FieldMappingTable = BTreeMap<String, String>;

/// Field identifier → checkbox state token for one checkbox option.
pub type CheckboxOption = BTreeMap<String, String>;

/// Column name → (normalized option value → fields to set).
pub type CheckboxMappingTable = BTreeMap<String, BTreeMap<String, CheckboxOption>>;

/// Columns whose values are parsed as dates before assignment.
pub type DateFieldSet = BTreeSet<String>;

/// Interpretation of a checkbox state token.
///
/// An empty token means unset; `/1` selects the export state named `1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckboxState {
    Off,
    On(String),
}

impl CheckboxState {
    /// Name of the appearance state used for unchecked boxes.
    pub const OFF: &'static str = "Off";

    #[must_use]
    pub fn parse(token: &str) -> Self {
        let name = token.trim().trim_start_matches('/');
        if name.is_empty() || name == Self::OFF {
            Self::Off
        } else {
            Self::On(name.to_string())
        }
    }

    /// Appearance state name (`Off` for unset).
    #[must_use]
    pub fn state_name(&self) -> &str {
        match self {
            Self::Off => Self::OFF,
            Self::On(name) => name,
        }
    }

    /// Token form as written in mapping tables.
    #[must_use]
    pub fn token(&self) -> String {
        match self {
            Self::Off => String::new(),
            Self::On(name) => format!("/{name}"),
        }
    }
}

/// Field identifier → final string value for one record.
///
/// Built fresh for each record; later inserts overwrite earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldAssignments(BTreeMap<String, String>);

impl FieldAssignments {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `field`, returning the value it replaced.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(field.into(), value.into())
    }

    /// Merges every pair of `other` into this set (last write wins).
    pub fn merge<'a, I>(&mut self, other: I)
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        for (field, value) in other {
            self.0.insert(field.clone(), value.clone());
        }
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.0
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldAssignments {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
