//! The fluent query facade.
//!
//! [`Query`] owns one [`ClauseBuilder`] per SQL clause and assembles them in
//! fixed clause order. Predicate methods live on [`WhereConditions`] and
//! [`HavingConditions`]. The async terminal operations such as
//! [`Query::get`] and [`Query::count`] take any [`Connection`](crate::Connection).

mod conditions;
mod execute;

pub use conditions::{HavingConditions, HavingGroup, WhereConditions, WhereGroup};

use compact_str::CompactString;
use quarry_core::expressions::{
    JoinKind, count_param, cross_join, join, list_item, order_item, table,
};
use quarry_core::ident::write_identifier;
use quarry_core::{
    ClauseBuilder, ClauseKind, Column, Direction, Entry, Fragment, Prepared, QueryError, Result,
    Statement, Value,
};

/// A SELECT statement under construction, and the source for the UPDATE,
/// DELETE and INSERT statements against the same table.
///
/// # Example
/// ```
/// use quarry::prelude::*;
///
/// let query = Query::from("users")
///     .where_eq("active", true)
///     .r#where("age", ">", 20)?
///     .order_by_desc("created_at")
///     .limit(10);
///
/// assert_eq!(
///     query.to_sql()?,
///     "SELECT * FROM `users` WHERE `active` = TRUE AND `age` > 20 ORDER BY `created_at` DESC LIMIT 10"
/// );
///
/// let prepared = query.prepare()?;
/// assert_eq!(
///     prepared.sql(),
///     "SELECT * FROM `users` WHERE `active` = ? AND `age` > ? ORDER BY `created_at` DESC LIMIT ?"
/// );
/// # Ok::<(), quarry::QueryError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    table: Option<CompactString>,
    select: ClauseBuilder,
    from: ClauseBuilder,
    joins: ClauseBuilder,
    conditions: ClauseBuilder,
    group_by: ClauseBuilder,
    having: ClauseBuilder,
    order_by: ClauseBuilder,
    limit: ClauseBuilder,
    offset: ClauseBuilder,
}

impl Default for Query {
    fn default() -> Self {
        Self::new()
    }
}

impl Query {
    /// A query without a table. Rendering fails with
    /// [`QueryError::TableNotSet`] until one is set with [`Query::table`].
    pub const fn new() -> Self {
        Self {
            table: None,
            select: ClauseBuilder::new(ClauseKind::Select),
            from: ClauseBuilder::new(ClauseKind::From),
            joins: ClauseBuilder::new(ClauseKind::Join),
            conditions: ClauseBuilder::new(ClauseKind::Where),
            group_by: ClauseBuilder::new(ClauseKind::GroupBy),
            having: ClauseBuilder::new(ClauseKind::Having),
            order_by: ClauseBuilder::new(ClauseKind::OrderBy),
            limit: ClauseBuilder::new(ClauseKind::Limit),
            offset: ClauseBuilder::new(ClauseKind::Offset),
        }
    }

    /// `SELECT * FROM `table``
    #[allow(clippy::should_implement_trait)]
    pub fn from(table: &str) -> Self {
        Self::new().table(table)
    }

    /// `SELECT * FROM `table` AS `alias``
    pub fn from_as(table: &str, alias: &str) -> Self {
        let mut query = Self::new();
        query.set_table(table, Some(alias));
        query
    }

    /// Replaces the target table.
    pub fn table(mut self, table: &str) -> Self {
        self.set_table(table, None);
        self
    }

    fn set_table(&mut self, name: &str, alias: Option<&str>) {
        self.table = Some(CompactString::from(name));
        self.from = ClauseBuilder::new(ClauseKind::From);
        self.from.push(table(name, alias));
    }

    /// A raw column expression, emitted verbatim wherever a column goes.
    #[inline]
    pub fn raw(sql: &str) -> Result<Column> {
        Column::raw(sql)
    }

    /// The target table, if one was set.
    #[inline]
    pub fn table_name(&self) -> Option<&str> {
        self.table.as_deref()
    }

    /// The container backing `kind`.
    ///
    /// [`ClauseKind::None`] has no container on a query and maps to the
    /// WHERE clause.
    pub fn clause(&self, kind: ClauseKind) -> &ClauseBuilder {
        match kind {
            ClauseKind::Select => &self.select,
            ClauseKind::From => &self.from,
            ClauseKind::Join => &self.joins,
            ClauseKind::Where | ClauseKind::None => &self.conditions,
            ClauseKind::GroupBy => &self.group_by,
            ClauseKind::Having => &self.having,
            ClauseKind::OrderBy => &self.order_by,
            ClauseKind::Limit => &self.limit,
            ClauseKind::Offset => &self.offset,
        }
    }

    fn clause_mut(&mut self, kind: ClauseKind) -> &mut ClauseBuilder {
        match kind {
            ClauseKind::Select => &mut self.select,
            ClauseKind::From => &mut self.from,
            ClauseKind::Join => &mut self.joins,
            ClauseKind::Where | ClauseKind::None => &mut self.conditions,
            ClauseKind::GroupBy => &mut self.group_by,
            ClauseKind::Having => &mut self.having,
            ClauseKind::OrderBy => &mut self.order_by,
            ClauseKind::Limit => &mut self.limit,
            ClauseKind::Offset => &mut self.offset,
        }
    }

    //--------------------------------------------------------------------------
    // SELECT
    //--------------------------------------------------------------------------

    /// Adds columns to the select list.
    pub fn select<I>(mut self, columns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Column>,
    {
        for column in columns {
            self.select.push(list_item(column));
        }
        self
    }

    /// Adds a raw select expression.
    pub fn select_raw(mut self, sql: &str) -> Result<Self> {
        self.select.push(list_item(Fragment::raw(sql)?));
        Ok(self)
    }

    /// Adds a raw select expression with one binding per `?`.
    pub fn select_raw_with<I>(mut self, sql: &str, bindings: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.select.push(list_item(Fragment::raw_with(sql, bindings)?));
        Ok(self)
    }

    /// `SELECT DISTINCT`. Has no effect while the select list is `*`.
    pub fn distinct(mut self) -> Result<Self> {
        self.select.set_distinct(true)?;
        Ok(self)
    }

    //--------------------------------------------------------------------------
    // JOIN
    //--------------------------------------------------------------------------

    fn push_join(
        mut self,
        kind: JoinKind,
        table: &str,
        first: impl Into<Column>,
        operator: &str,
        second: impl Into<Column>,
    ) -> Result<Self> {
        self.joins.push(join(kind, table, first, operator, second)?);
        Ok(self)
    }

    /// `INNER JOIN `table` ON first op second`
    pub fn join(
        self,
        table: &str,
        first: impl Into<Column>,
        operator: &str,
        second: impl Into<Column>,
    ) -> Result<Self> {
        self.push_join(JoinKind::Inner, table, first, operator, second)
    }

    pub fn left_join(
        self,
        table: &str,
        first: impl Into<Column>,
        operator: &str,
        second: impl Into<Column>,
    ) -> Result<Self> {
        self.push_join(JoinKind::Left, table, first, operator, second)
    }

    pub fn right_join(
        self,
        table: &str,
        first: impl Into<Column>,
        operator: &str,
        second: impl Into<Column>,
    ) -> Result<Self> {
        self.push_join(JoinKind::Right, table, first, operator, second)
    }

    pub fn cross_join(mut self, table: &str) -> Self {
        self.joins.push(cross_join(table));
        self
    }

    //--------------------------------------------------------------------------
    // GROUP BY / ORDER BY
    //--------------------------------------------------------------------------

    pub fn group_by<I>(mut self, columns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Column>,
    {
        for column in columns {
            self.group_by.push(list_item(column));
        }
        self
    }

    pub fn group_by_raw(mut self, sql: &str) -> Result<Self> {
        self.group_by.push(list_item(Fragment::raw(sql)?));
        Ok(self)
    }

    pub fn order_by(mut self, column: impl Into<Column>, direction: Direction) -> Self {
        self.order_by.push(order_item(column, direction));
        self
    }

    #[inline]
    pub fn order_by_desc(self, column: impl Into<Column>) -> Self {
        self.order_by(column, Direction::Desc)
    }

    /// Raw ordering text, e.g. `"length(name) DESC"`.
    pub fn order_by_raw(mut self, sql: &str) -> Result<Self> {
        self.order_by.push(list_item(Fragment::raw(sql)?));
        Ok(self)
    }

    //--------------------------------------------------------------------------
    // LIMIT / OFFSET
    //--------------------------------------------------------------------------

    /// Sets the row limit. A later call replaces the earlier one.
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit.push(count_param(limit));
        self
    }

    /// Sets the row offset. A later call replaces the earlier one.
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset.push(count_param(offset));
        self
    }

    /// One-based page of `per_page` rows. Page 0 is treated as page 1.
    pub fn page(self, page: u64, per_page: u64) -> Self {
        let skip = (page.max(1) - 1).saturating_mul(per_page);
        self.limit(per_page).offset(skip)
    }

    //--------------------------------------------------------------------------
    // Conditionals
    //--------------------------------------------------------------------------

    /// Applies `f` when `condition` holds.
    pub fn when<F>(self, condition: bool, f: F) -> Result<Self>
    where
        F: FnOnce(Self) -> Result<Self>,
    {
        if condition { f(self) } else { Ok(self) }
    }

    /// Applies `f` when `condition` holds and `otherwise` when it does not.
    pub fn when_else<F, G>(self, condition: bool, f: F, otherwise: G) -> Result<Self>
    where
        F: FnOnce(Self) -> Result<Self>,
        G: FnOnce(Self) -> Result<Self>,
    {
        if condition { f(self) } else { otherwise(self) }
    }

    /// Applies `f` with the contained value when `value` is `Some`.
    pub fn when_some<T, F>(self, value: Option<T>, f: F) -> Result<Self>
    where
        F: FnOnce(Self, T) -> Result<Self>,
    {
        match value {
            Some(value) => f(self, value),
            None => Ok(self),
        }
    }

    //--------------------------------------------------------------------------
    // Cloning
    //--------------------------------------------------------------------------

    /// Deep copy with the listed clauses reset to empty containers.
    ///
    /// Excluding [`ClauseKind::From`] also clears the target table.
    pub fn clone_without(&self, kinds: &[ClauseKind]) -> Self {
        let mut query = self.clone();
        for &kind in kinds {
            if kind == ClauseKind::None {
                continue;
            }
            *query.clause_mut(kind) = ClauseBuilder::new(kind);
            if kind == ClauseKind::From {
                query.table = None;
            }
        }
        query
    }

    //--------------------------------------------------------------------------
    // Rendering
    //--------------------------------------------------------------------------

    /// The SELECT statement with `?` placeholders and its bindings.
    #[inline]
    pub fn prepare(&self) -> Result<Prepared> {
        Statement::prepare(self)
    }

    /// The SELECT statement with every binding inlined.
    #[inline]
    pub fn to_sql(&self) -> Result<String> {
        Ok(self.prepare()?.to_literal())
    }

    fn require_table(&self) -> Result<&str> {
        self.table.as_deref().ok_or(QueryError::TableNotSet)
    }

    /// Appends the WHERE, ORDER BY and LIMIT clauses shared by UPDATE and
    /// DELETE.
    fn append_filters(&self, out: &mut Prepared) {
        for kind in [ClauseKind::Where, ClauseKind::OrderBy, ClauseKind::Limit] {
            out.append_with(" ", self.clause(kind).prepare());
        }
    }

    /// ``INSERT INTO `t` (`a`, `b`) VALUES (?, ?)``
    pub fn prepare_insert<I, K, V>(&self, fields: I) -> Result<Prepared>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let table = self.require_table()?;

        let mut columns = String::new();
        let mut values = Prepared::new();
        for (i, (column, value)) in fields.into_iter().enumerate() {
            if i > 0 {
                columns.push_str(", ");
                values.push_str(", ");
            }
            write_identifier(&mut columns, column.as_ref());
            values.push_param(value.into());
        }
        if values.is_empty() {
            return Err(QueryError::MissingArgument {
                class: "Query",
                method: "insert",
            });
        }

        let mut out = Prepared::new();
        out.push_str("INSERT INTO ");
        write_identifier(&mut out.sql, table);
        out.push_str(" (");
        out.push_str(&columns);
        out.push_str(") VALUES (");
        out.append(values);
        out.push(')');

        quarry_core::quarry_trace_render!("insert", out.sql());
        Ok(out)
    }

    /// ``UPDATE `t` SET `a` = ?, `b` = ? [WHERE ...] [ORDER BY ...] [LIMIT ?]``
    pub fn prepare_update<I, K, V>(&self, fields: I) -> Result<Prepared>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let table = self.require_table()?;

        let mut assignments = Prepared::new();
        for (i, (column, value)) in fields.into_iter().enumerate() {
            if i > 0 {
                assignments.push_str(", ");
            }
            write_identifier(&mut assignments.sql, column.as_ref());
            assignments.push_str(" = ");
            assignments.push_param(value.into());
        }
        if assignments.is_empty() {
            return Err(QueryError::MissingArgument {
                class: "Query",
                method: "update",
            });
        }

        let mut out = Prepared::new();
        out.push_str("UPDATE ");
        write_identifier(&mut out.sql, table);
        out.push_str(" SET ");
        out.append(assignments);
        self.append_filters(&mut out);

        quarry_core::quarry_trace_render!("update", out.sql());
        Ok(out)
    }

    /// ``DELETE FROM `t` [WHERE ...] [ORDER BY ...] [LIMIT ?]``
    pub fn prepare_delete(&self) -> Result<Prepared> {
        let table = self.require_table()?;

        let mut out = Prepared::new();
        out.push_str("DELETE FROM ");
        write_identifier(&mut out.sql, table);
        self.append_filters(&mut out);

        quarry_core::quarry_trace_render!("delete", out.sql());
        Ok(out)
    }
}

impl Statement for Query {
    fn prepare(&self) -> Result<Prepared> {
        if self.from.is_empty() {
            return Err(QueryError::TableNotSet);
        }

        let mut out = Prepared::new();
        for kind in ClauseKind::ORDERED {
            out.append_with(" ", self.clause(kind).prepare());
        }

        quarry_core::quarry_trace_render!("select", out.sql());
        Ok(out)
    }
}

impl WhereConditions for Query {
    #[inline]
    fn push_where(&mut self, entry: Entry) {
        self.conditions.push(entry);
    }
}

impl HavingConditions for Query {
    #[inline]
    fn push_having(&mut self, entry: Entry) {
        self.having.push(entry);
    }
}
