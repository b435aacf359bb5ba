//! PDF form filling over AcroForm templates.
//!
//! One output document per record, built in strictly sequential stages:
//!
//! 1. [`load_template`]: read the template fresh from disk
//! 2. [`copy_structure`]: new catalog carrying only the page tree
//! 3. [`merge_form_metadata`]: bring over `/AcroForm`, set `/NeedAppearances`
//! 4. [`formfill_map::resolve_fields`]: record → field assignments (pure, so
//!    [`FormFiller::fill_resolved`] accepts a resolution computed up front)
//! 5. [`apply_fields`]: set `/V` (and `/AS` on checkbox widgets)
//! 6. [`persist`]: write `<filename>.pdf` or `output_<N>.pdf`
//!
//! [`FormFiller`] drives the stages for one record at a time. The [`inspect`]
//! module lists a template's fields.

mod apply;
mod document;
mod error;
mod fields;
mod filler;
pub mod inspect;
mod naming;
mod text;

// === Error Types ===
pub use error::{FillError, Result};

// === Stages ===
pub use apply::{ApplySummary, apply_fields};
pub use document::{copy_structure, load_template, merge_form_metadata, persist};
pub use naming::output_path_for;

// === Driver ===
pub use filler::{FillOutcome, FormFiller};

// === Inspection ===
pub use fields::FieldType;
pub use inspect::{FieldInfo, list_fields};
