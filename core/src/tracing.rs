//! Tracing hooks for statement rendering and execution.
//!
//! Enable the `tracing` feature to emit events via the `tracing` crate. The
//! macros expand to nothing when the feature is disabled, so call sites need
//! no `#[cfg]` of their own. The feature is checked in the crate that expands
//! the macro, which must forward it to `quarry-core`.

/// Emit a debug-level event with the SQL text and parameter count.
///
/// ```ignore
/// quarry_trace_query!(prepared.sql(), prepared.params().len());
/// ```
#[macro_export]
macro_rules! quarry_trace_query {
    ($sql:expr, $param_count:expr) => {
        #[cfg(feature = "tracing")]
        ::tracing::debug!(sql = %$sql, params = $param_count, "quarry.query");
    };
}

/// Emit a trace-level event when a statement is rendered.
///
/// ```ignore
/// quarry_trace_render!("select", prepared.sql());
/// ```
#[macro_export]
macro_rules! quarry_trace_render {
    ($kind:literal, $sql:expr) => {
        #[cfg(feature = "tracing")]
        ::tracing::trace!(kind = $kind, sql = %$sql, "quarry.render");
    };
}
