use crate::builder::ClauseKind;
use compact_str::CompactString;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueryError {
    /// Comparison operator outside the whitelist
    #[error(
        "Invalid comparison operator `{0}`; expected one of: ==, =, !=, <>, >, <, >=, <=, !<, !>"
    )]
    InvalidOperator(CompactString),

    /// Range input with the wrong number of values
    #[error("Invalid value array length: expected {expected} values, got {actual}")]
    InvalidArrayLength { expected: usize, actual: usize },

    /// A required argument was not supplied
    #[error("Missing required argument for {class}::{method}")]
    MissingArgument {
        class: &'static str,
        method: &'static str,
    },

    /// DISTINCT requested on a clause other than SELECT
    #[error("DISTINCT can only be applied to a SELECT clause, not {0}")]
    DistinctNotAllowed(ClauseKind),

    /// Terminal operation on a query without a table
    #[error("Table not set; call `from` before executing the query")]
    TableNotSet,

    /// Placeholder count differs from the number of bindings
    #[error("Placeholder mismatch: {placeholders} placeholders but {bindings} bindings")]
    PlaceholderMismatch { placeholders: usize, bindings: usize },

    /// Error reported by the execution backend
    #[error("Execution error: {0}")]
    Execution(String),

    /// Rusqlite specific errors
    #[cfg(feature = "rusqlite")]
    #[error("Rusqlite error: {0}")]
    Rusqlite(#[from] rusqlite::Error),
}

/// Result type for query building and execution
pub type Result<T> = std::result::Result<T, QueryError>;
