//! Aggregate and EXISTS wrappers around complete statements.

use crate::error::{QueryError, Result};
use crate::ident::{Column, IDENT_QUOTE};
use crate::prepared::{Prepared, Statement};
use crate::value::write_quoted;
use core::fmt;

/// Alias given to the wrapped statement.
pub const AGGREGATE_TABLE: &str = "temp_table";

/// Name of the single result column.
pub const AGGREGATE_COLUMN: &str = "aggregate";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateFn {
    Count,
    Sum,
    Avg,
    Min,
    Max,
}

impl AggregateFn {
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            AggregateFn::Count => "COUNT",
            AggregateFn::Sum => "SUM",
            AggregateFn::Avg => "AVG",
            AggregateFn::Min => "MIN",
            AggregateFn::Max => "MAX",
        }
    }

    const fn method(self) -> &'static str {
        match self {
            AggregateFn::Count => "count",
            AggregateFn::Sum => "sum",
            AggregateFn::Avg => "avg",
            AggregateFn::Min => "min",
            AggregateFn::Max => "max",
        }
    }
}

impl fmt::Display for AggregateFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `SELECT FN(temp_table.col) AS aggregate FROM (<base>) AS temp_table`
///
/// Only COUNT may omit the column, in which case it counts `*`.
///
/// # Example
/// ```
/// # use quarry_core::{Aggregate, AggregateFn, Prepared, Result, Statement};
/// struct Users;
/// impl Statement for Users {
///     fn prepare(&self) -> Result<Prepared> {
///         let mut out = Prepared::new();
///         out.push_str("SELECT * FROM `users`");
///         Ok(out)
///     }
/// }
///
/// let count = Aggregate::new(Users, AggregateFn::Count, None).unwrap();
/// assert_eq!(
///     count.to_sql_string().unwrap(),
///     "SELECT COUNT(*) AS aggregate FROM (SELECT * FROM `users`) AS temp_table"
/// );
/// assert!(Aggregate::new(Users, AggregateFn::Sum, None).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Aggregate<S> {
    base: S,
    function: AggregateFn,
    column: Option<Column>,
}

impl<S: Statement> Aggregate<S> {
    pub fn new(base: S, function: AggregateFn, column: Option<Column>) -> Result<Self> {
        let column = column.filter(|column| !matches!(column, Column::Name(name) if name == "*"));
        if column.is_none() && function != AggregateFn::Count {
            return Err(QueryError::MissingArgument {
                class: "Aggregate",
                method: function.method(),
            });
        }
        Ok(Self {
            base,
            function,
            column,
        })
    }

    #[inline]
    pub const fn function(&self) -> AggregateFn {
        self.function
    }

    #[inline]
    pub fn base(&self) -> &S {
        &self.base
    }
}

impl<S: Statement> Statement for Aggregate<S> {
    fn prepare(&self) -> Result<Prepared> {
        let base = self.base.prepare()?;

        let mut out = Prepared::new();
        out.push_str("SELECT ");
        out.push_str(self.function.as_str());
        out.push('(');
        match &self.column {
            None => out.push('*'),
            // The derived table only exposes the bare column name.
            Some(Column::Name(name)) => {
                let bare = name.rsplit('.').next().unwrap_or(name.as_str());
                out.push_str(AGGREGATE_TABLE);
                out.push('.');
                write_quoted(&mut out.sql, bare, IDENT_QUOTE);
            }
            Some(Column::Raw(fragment)) => fragment.write_to(&mut out, false),
        }
        out.push_str(") AS ");
        out.push_str(AGGREGATE_COLUMN);
        out.push_str(" FROM (");
        out.append(base);
        out.push_str(") AS ");
        out.push_str(AGGREGATE_TABLE);

        crate::quarry_trace_render!("aggregate", out.sql());
        Ok(out)
    }
}

/// `SELECT EXISTS(<query>)`
#[derive(Debug, Clone)]
pub struct Exists<S>(pub S);

impl<S: Statement> Statement for Exists<S> {
    fn prepare(&self) -> Result<Prepared> {
        let inner = self.0.prepare()?;
        let mut out = Prepared::new();
        out.push_str("SELECT EXISTS(");
        out.append(inner);
        out.push(')');

        crate::quarry_trace_render!("exists", out.sql());
        Ok(out)
    }
}
