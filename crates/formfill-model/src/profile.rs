//! Mapping profiles: the immutable tables that drive one fill run.
//!
//! A profile bundles the regular field table, the checkbox table, the set of
//! date columns and the output naming settings. Profiles are loaded once at
//! startup, either from the built-in Form 8936 Schedule A tables or from a
//! TOML file, and validated before any record is processed.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ModelError, Result};
use crate::mapping::{CheckboxMappingTable, CheckboxOption, DateFieldSet, FieldMappingTable};

/// Default column holding the output file stem.
pub const DEFAULT_FILENAME_COLUMN: &str = "filename";
/// Default stem for rows without a file name (`output_<N>`).
pub const DEFAULT_FALLBACK_STEM: &str = "output";
/// Default output document extension.
pub const DEFAULT_EXTENSION: &str = "pdf";
/// Default rendering for date fields (`MM/DD/YYYY`).
pub const DEFAULT_DATE_FORMAT: &str = "%m/%d/%Y";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MappingProfile {
    /// Column whose value names the output file.
    #[serde(default = "default_filename_column")]
    pub filename_column: String,

    /// Stem used for `<stem>_<row>` when a row has no file name.
    #[serde(default = "default_fallback_stem")]
    pub fallback_stem: String,

    /// Extension appended to every output file name, without the dot.
    #[serde(default = "default_extension")]
    pub extension: String,

    /// chrono format string for date fields.
    #[serde(default = "default_date_format")]
    pub date_format: String,

    #[serde(default)]
    pub date_fields: DateFieldSet,

    #[serde(default)]
    pub fields: FieldMappingTable,

    #[serde(default)]
    pub checkboxes: CheckboxMappingTable,
}

fn default_filename_column() -> String {
    DEFAULT_FILENAME_COLUMN.to_string()
}

fn default_fallback_stem() -> String {
    DEFAULT_FALLBACK_STEM.to_string()
}

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

impl Default for MappingProfile {
    fn default() -> Self {
        Self::form_8936_schedule_a()
    }
}

impl MappingProfile {
    /// Profile with no mappings and default output settings.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            filename_column: default_filename_column(),
            fallback_stem: default_fallback_stem(),
            extension: default_extension(),
            date_format: default_date_format(),
            date_fields: DateFieldSet::new(),
            fields: FieldMappingTable::new(),
            checkboxes: CheckboxMappingTable::new(),
        }
    }

    /// Built-in tables for IRS Form 8936 Schedule A (2023).
    #[must_use]
    pub fn form_8936_schedule_a() -> Self {
        let fields = [
            ("Name(s)", "f1_01[0]"),
            ("Identifying number", "f1_02[0]"),
            ("Year", "f1_03[0]"),
            ("Make", "f1_04[0]"),
            ("Model", "f1_05[0]"),
            ("VIN", "f1_06[0]"),
            ("Date in Service", "f1_07[0]"),
        ]
        .into_iter()
        .map(|(column, field)| (column.to_string(), field.to_string()))
        .collect();

        let checkboxes = [
            ("more than $25,000?", "c1_1"),
            ("new clean vehicle?", "c1_2"),
        ]
        .into_iter()
        .map(|(column, group)| (column.to_string(), yes_no_options(group)))
        .collect();

        Self {
            date_fields: std::iter::once("Date in Service".to_string()).collect(),
            fields,
            checkboxes,
            ..Self::empty()
        }
    }

    /// Loads and validates a profile from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ModelError::io(path, e))?;
        let profile: Self = toml::from_str(&contents).map_err(|e| ModelError::TomlParse {
            path: path.to_path_buf(),
            source: e,
        })?;
        profile.validate()?;
        debug!(
            path = %path.display(),
            fields = profile.fields.len(),
            checkboxes = profile.checkboxes.len(),
            "loaded mapping profile"
        );
        Ok(profile)
    }

    /// Renders the profile as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Checks the table invariants.
    ///
    /// Fails when two columns target the same field, when a checkbox option
    /// key is not normalized or sets nothing, or when naming settings are
    /// empty. Date columns that are not mapped as regular fields only warn.
    pub fn validate(&self) -> Result<()> {
        if self.extension.trim().is_empty() {
            return Err(ModelError::EmptyExtension);
        }
        if self.fallback_stem.trim().is_empty() {
            return Err(ModelError::EmptyFallbackStem);
        }
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(ModelError::InvalidDateFormat(self.date_format.clone()));
        }

        let mut owners: BTreeMap<&str, &str> = BTreeMap::new();
        for (column, field) in &self.fields {
            if let Some(first) = owners.insert(field.as_str(), column.as_str()) {
                return Err(ModelError::DuplicateField {
                    field: field.clone(),
                    first: first.to_string(),
                    second: column.clone(),
                });
            }
        }

        for (column, options) in &self.checkboxes {
            for (option, targets) in options {
                if option.trim().to_lowercase() != *option {
                    return Err(ModelError::OptionNotNormalized {
                        column: column.clone(),
                        option: option.clone(),
                    });
                }
                if targets.is_empty() {
                    return Err(ModelError::EmptyOption {
                        column: column.clone(),
                        option: option.clone(),
                    });
                }
            }
        }

        for column in &self.date_fields {
            if !self.fields.contains_key(column) {
                warn!(column = %column, "date column is not mapped to a field");
            }
        }
        Ok(())
    }

    /// True when `column` is rendered as a date.
    #[must_use]
    pub fn is_date_field(&self, column: &str) -> bool {
        self.date_fields.contains(column)
    }
}

/// `<group>[0]` is the "yes" box with state `/1`, `<group>[1]` the "no" box
/// with state `/2`.
fn yes_no_options(group: &str) -> BTreeMap<String, CheckboxOption> {
    let yes_field = format!("{group}[0]");
    let no_field = format!("{group}[1]");
    let yes: CheckboxOption = [
        (yes_field.clone(), "/1".to_string()),
        (no_field.clone(), String::new()),
    ]
    .into_iter()
    .collect();
    let no: CheckboxOption = [(yes_field, String::new()), (no_field, "/2".to_string())]
        .into_iter()
        .collect();
    [("yes".to_string(), yes), ("no".to_string(), no)]
        .into_iter()
        .collect()
}
