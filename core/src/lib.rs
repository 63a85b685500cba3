//! Statement composition and dual-mode rendering for `quarry`.
//!
//! Fragments carry SQL text with `?` placeholders and their bindings.
//! [`ClauseBuilder`]s order them per clause and [`Group`]s nest them in
//! parentheses. Every rendering is produced as a [`Prepared`] pair; the
//! literal SQL string is projected from it with [`Prepared::to_literal`].

pub mod aggregate;
pub mod builder;
pub mod error;
pub mod expressions;
pub mod fragment;
pub mod ident;
pub mod prepared;
pub mod tracing;
pub mod value;

// Re-export key types and traits
pub use aggregate::{AGGREGATE_COLUMN, AGGREGATE_TABLE, Aggregate, AggregateFn, Exists};
pub use builder::{ClauseBuilder, ClauseKind, Entry, Group};
pub use error::{QueryError, Result};
pub use expressions::{Direction, JoinKind, Match};
pub use fragment::{Connector, Fragment};
pub use ident::{Column, render_identifier};
pub use prepared::{PLACEHOLDER, Prepared, Statement, count_placeholders};
pub use value::{Value, render_literal_list};
