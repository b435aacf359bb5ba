//! Field mapping and value coercion.
//!
//! Turns one [`formfill_model::Record`] into the [`formfill_model::FieldAssignments`]
//! applied to its output document:
//!
//! - regular columns map to one field each; blanks become `""`
//! - date columns are parsed and re-rendered (`MM/DD/YYYY` by default)
//! - checkbox columns select an option that sets several fields at once
//!
//! Everything here is pure; problems are reported as [`ResolutionIssue`]s
//! rather than errors.

pub mod coerce;
pub mod date;
mod issue;
mod resolve;

pub use coerce::{DateCoercion, coerce_date, normalize_option, plain_string};
pub use date::{DateParseError, format_date, parse_date, parse_date_str};
pub use issue::{Redacted, ResolutionIssue};
pub use resolve::{Resolution, resolve_fields};
