//! Process-wide switch for logging cell values.
//!
//! Rows carry names and taxpayer identification numbers. Every crate that puts
//! a cell value into a log event passes it through [`redact_value`] first.

use std::sync::atomic::{AtomicBool, Ordering};

static LOG_DATA_ENABLED: AtomicBool = AtomicBool::new(false);

/// Placeholder used when value logging is disabled.
pub const REDACTED_VALUE: &str = "[REDACTED]";

/// Enables or disables logging of cell values.
pub fn set_log_data(enabled: bool) {
    LOG_DATA_ENABLED.store(enabled, Ordering::Release);
}

/// Returns true if cell values may be logged.
pub fn log_data_enabled() -> bool {
    LOG_DATA_ENABLED.load(Ordering::Acquire)
}

/// Returns the value when value logging is enabled, otherwise a redacted token.
pub fn redact_value(value: &str) -> &str {
    if log_data_enabled() {
        value
    } else {
        REDACTED_VALUE
    }
}
