//! # quarry
//!
//! A fluent SQL statement builder. Every statement renders either as a
//! parameterized pair (SQL with `?` placeholders plus its bindings) or as a
//! literal SQL string with the bindings inlined.
//!
//! ## Quick Start
//!
//! ```rust
//! use quarry::prelude::*;
//!
//! # fn main() -> quarry::Result<()> {
//! let query = Query::from("users")
//!     .select(["name", "email"])
//!     .where_eq("active", true)
//!     .where_group(|group| {
//!         Ok(group.r#where("age", ">", 20)?.or_where_null("deleted_at"))
//!     })?
//!     .order_by("name", Direction::Asc)
//!     .limit(10);
//!
//! assert_eq!(
//!     query.to_sql()?,
//!     "SELECT `name`, `email` FROM `users` WHERE `active` = TRUE AND (`age` > 20 OR `deleted_at` IS NULL) ORDER BY `name` ASC LIMIT 10"
//! );
//!
//! let (sql, params) = query.prepare()?.into_parts();
//! assert_eq!(
//!     sql,
//!     "SELECT `name`, `email` FROM `users` WHERE `active` = ? AND (`age` > ? OR `deleted_at` IS NULL) ORDER BY `name` ASC LIMIT ?"
//! );
//! assert_eq!(params.len(), 3);
//! # Ok(())
//! # }
//! ```
//!
//! ## Execution
//!
//! Terminal operations such as [`Query::get`], [`Query::count`] and
//! [`Query::insert_get_id`] hand the parameterized pair to a [`Connection`].
//!
//! | Database | Driver     | Feature Flag |
//! |----------|------------|--------------|
//! | SQLite   | rusqlite   | `rusqlite`   |

#![cfg_attr(docsrs, feature(doc_cfg))]

mod connection;
mod query;
mod row;

#[cfg(feature = "rusqlite")]
#[cfg_attr(docsrs, doc(cfg(feature = "rusqlite")))]
mod rusqlite;

// =============================================================================
// Root-level exports
// =============================================================================

/// Result type for quarry operations
pub use quarry_core::error::Result;

/// Error types
pub use quarry_core::error::QueryError;

pub use connection::Connection;
pub use query::{HavingConditions, HavingGroup, Query, WhereConditions, WhereGroup};
pub use row::Row;

pub use quarry_core::{Direction, Prepared, Statement, Value};

// =============================================================================
// Core module
// =============================================================================

/// The statement engine: fragments, clause containers, groups and the
/// aggregate wrappers.
///
/// ```rust
/// use quarry::core::expressions::{comparison, null_check};
/// use quarry::core::{ClauseBuilder, ClauseKind, Connector};
///
/// let mut clause = ClauseBuilder::new(ClauseKind::Where);
/// clause
///     .push(comparison("age", ">", 20).unwrap())
///     .push(null_check("deleted_at", false).with_connector(Connector::Or));
///
/// assert_eq!(clause.render_literal(), "WHERE `age` > 20 OR `deleted_at` IS NULL");
/// ```
pub mod core {
    /// Containers and groups
    pub use quarry_core::{ClauseBuilder, ClauseKind, Entry, Group};

    /// Leaf fragments
    pub use quarry_core::{Column, Connector, Fragment};

    /// Aggregate and EXISTS wrappers
    pub use quarry_core::{AGGREGATE_COLUMN, AGGREGATE_TABLE, Aggregate, AggregateFn, Exists};

    /// Rendering helpers
    pub use quarry_core::{PLACEHOLDER, count_placeholders, render_identifier, render_literal_list};

    /// Fragment constructors for each predicate and clause shape
    pub use quarry_core::expressions;
}

/// Everything needed to build and run queries.
pub mod prelude {
    pub use crate::connection::Connection;
    pub use crate::query::{HavingConditions, HavingGroup, Query, WhereConditions, WhereGroup};
    pub use crate::row::Row;

    pub use quarry_core::{
        ClauseKind, Column, Direction, Prepared, QueryError, Result, Statement, Value,
    };
}
