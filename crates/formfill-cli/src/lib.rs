//! CLI library components for the form filler.

pub mod logging;
pub mod pipeline;
pub mod types;
