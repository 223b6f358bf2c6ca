//! Logging infrastructure for scan filters.
//!
//! Filters use `tracing` for structured logging. All events use target
//! "scanfilter" and include an `event` field for filtering.
//!
//! ## Library Integration
//!
//! This crate never initializes a global subscriber. Applications configure
//! tracing via `tracing_subscriber` or similar.
//!
//! ## Conventions
//!
//! - `event`: snake_case event name (required)
//! - `component`: module/subsystem (e.g., "compiler", "evaluate")
//! - Use `%` for Display, `?` for Debug formatting
//! - Nothing is logged per evaluated value; the scan loop stays silent

/// Target for all scan filter log events.
pub(crate) const SCANFILTER_TARGET: &str = "scanfilter";

/// Macro for debug-level log events.
///
/// # Example
/// ```ignore
/// log_debug!(
///     component = "compiler",
///     event = "compile_filter",
///     column_type = %column_type,
///     filter = filter.kind(),
/// );
/// ```
macro_rules! log_debug {
    ($($field:tt)*) => {
        ::tracing::debug!(target: $crate::observability::SCANFILTER_TARGET, $($field)*)
    };
}

/// Macro for warn-level log events.
macro_rules! log_warn {
    ($($field:tt)*) => {
        ::tracing::warn!(target: $crate::observability::SCANFILTER_TARGET, $($field)*)
    };
}

pub(crate) use log_debug;
pub(crate) use log_warn;
