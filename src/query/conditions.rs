//! WHERE and HAVING predicate methods shared by [`Query`](super::Query) and
//! the group callbacks.

use quarry_core::expressions::{
    Match, column_comparison, column_equals, column_range, comparison, equals, exists, like,
    membership, multi_column, null_check, range,
};
use quarry_core::{Column, Connector, Entry, Fragment, Group, Result, Statement, Value};

/// Generates the four connector/negation variants of a predicate family:
/// `{p}_{name}`, `or_{p}_{name}`, `{p}_not_{name}` and `or_{p}_not_{name}`.
///
/// `$not` is bound to the negation flag inside `$build`. Fallible families
/// return `Result<Self>`.
macro_rules! predicate_family {
    (
        $push:ident, $prefix:ident,
        $(#[$meta:meta])*
        fn $name:ident $(<$($gen:ident),+>)? ($($arg:ident: $ty:ty),* $(,)?)
        $(where { $($bound:tt)* })?
        => fallible |$not:ident| $build:expr
    ) => {
        paste::paste! {
            $(#[$meta])*
            fn [<$prefix _ $name>] $(<$($gen),+>)? (mut self, $($arg: $ty),*) -> Result<Self>
            $(where $($bound)*)?
            {
                let $not = false;
                self.$push(Entry::from($build?).with_connector(Connector::And));
                Ok(self)
            }

            $(#[$meta])*
            fn [<or_ $prefix _ $name>] $(<$($gen),+>)? (mut self, $($arg: $ty),*) -> Result<Self>
            $(where $($bound)*)?
            {
                let $not = false;
                self.$push(Entry::from($build?).with_connector(Connector::Or));
                Ok(self)
            }

            $(#[$meta])*
            fn [<$prefix _not_ $name>] $(<$($gen),+>)? (mut self, $($arg: $ty),*) -> Result<Self>
            $(where $($bound)*)?
            {
                let $not = true;
                self.$push(Entry::from($build?).with_connector(Connector::And));
                Ok(self)
            }

            $(#[$meta])*
            fn [<or_ $prefix _not_ $name>] $(<$($gen),+>)? (mut self, $($arg: $ty),*) -> Result<Self>
            $(where $($bound)*)?
            {
                let $not = true;
                self.$push(Entry::from($build?).with_connector(Connector::Or));
                Ok(self)
            }
        }
    };
    (
        $push:ident, $prefix:ident,
        $(#[$meta:meta])*
        fn $name:ident $(<$($gen:ident),+>)? ($($arg:ident: $ty:ty),* $(,)?)
        $(where { $($bound:tt)* })?
        => |$not:ident| $build:expr
    ) => {
        paste::paste! {
            $(#[$meta])*
            fn [<$prefix _ $name>] $(<$($gen),+>)? (mut self, $($arg: $ty),*) -> Self
            $(where $($bound)*)?
            {
                let $not = false;
                self.$push(Entry::from($build).with_connector(Connector::And));
                self
            }

            $(#[$meta])*
            fn [<or_ $prefix _ $name>] $(<$($gen),+>)? (mut self, $($arg: $ty),*) -> Self
            $(where $($bound)*)?
            {
                let $not = false;
                self.$push(Entry::from($build).with_connector(Connector::Or));
                self
            }

            $(#[$meta])*
            fn [<$prefix _not_ $name>] $(<$($gen),+>)? (mut self, $($arg: $ty),*) -> Self
            $(where $($bound)*)?
            {
                let $not = true;
                self.$push(Entry::from($build).with_connector(Connector::And));
                self
            }

            $(#[$meta])*
            fn [<or_ $prefix _not_ $name>] $(<$($gen),+>)? (mut self, $($arg: $ty),*) -> Self
            $(where $($bound)*)?
            {
                let $not = true;
                self.$push(Entry::from($build).with_connector(Connector::Or));
                self
            }
        }
    };
}

/// Wraps a finished group with its negation flag.
fn finish_group(group: Group, not: bool) -> Group {
    if not { group.negate() } else { group }
}

//------------------------------------------------------------------------------
// WHERE
//------------------------------------------------------------------------------

/// Predicate methods for the WHERE clause.
///
/// Methods taking an operator validate it and return `Result<Self>`; the
/// `_eq` forms are the operator-omitted shorthands and default to `=`.
pub trait WhereConditions: Sized {
    /// Appends a finished entry to the WHERE predicate list.
    fn push_where(&mut self, entry: Entry);

    /// `AND column op value`
    fn r#where(
        mut self,
        column: impl Into<Column>,
        operator: &str,
        value: impl Into<Value>,
    ) -> Result<Self> {
        self.push_where(comparison(column, operator, value)?.with_connector(Connector::And).into());
        Ok(self)
    }

    /// `OR column op value`
    fn or_where(
        mut self,
        column: impl Into<Column>,
        operator: &str,
        value: impl Into<Value>,
    ) -> Result<Self> {
        self.push_where(comparison(column, operator, value)?.with_connector(Connector::Or).into());
        Ok(self)
    }

    /// `AND column = value`
    fn where_eq(mut self, column: impl Into<Column>, value: impl Into<Value>) -> Self {
        self.push_where(equals(column, value).with_connector(Connector::And).into());
        self
    }

    /// `OR column = value`
    fn or_where_eq(mut self, column: impl Into<Column>, value: impl Into<Value>) -> Self {
        self.push_where(equals(column, value).with_connector(Connector::Or).into());
        self
    }

    /// `AND NOT column op value`
    fn where_not(
        mut self,
        column: impl Into<Column>,
        operator: &str,
        value: impl Into<Value>,
    ) -> Result<Self> {
        let fragment = comparison(column, operator, value)?;
        self.push_where(fragment.with_connector(Connector::And).negate().into());
        Ok(self)
    }

    /// `OR NOT column op value`
    fn or_where_not(
        mut self,
        column: impl Into<Column>,
        operator: &str,
        value: impl Into<Value>,
    ) -> Result<Self> {
        let fragment = comparison(column, operator, value)?;
        self.push_where(fragment.with_connector(Connector::Or).negate().into());
        Ok(self)
    }

    /// Raw predicate text without bindings.
    fn where_raw(mut self, sql: &str) -> Result<Self> {
        self.push_where(Fragment::raw(sql)?.with_connector(Connector::And).into());
        Ok(self)
    }

    fn or_where_raw(mut self, sql: &str) -> Result<Self> {
        self.push_where(Fragment::raw(sql)?.with_connector(Connector::Or).into());
        Ok(self)
    }

    /// Raw predicate text with one binding per `?`.
    fn where_raw_with<I>(mut self, sql: &str, bindings: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let fragment = Fragment::raw_with(sql, bindings)?;
        self.push_where(fragment.with_connector(Connector::And).into());
        Ok(self)
    }

    fn or_where_raw_with<I>(mut self, sql: &str, bindings: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let fragment = Fragment::raw_with(sql, bindings)?;
        self.push_where(fragment.with_connector(Connector::Or).into());
        Ok(self)
    }

    /// `AND first op second`, comparing two columns.
    fn where_column(
        mut self,
        first: impl Into<Column>,
        operator: &str,
        second: impl Into<Column>,
    ) -> Result<Self> {
        let fragment = column_comparison(first, operator, second)?;
        self.push_where(fragment.with_connector(Connector::And).into());
        Ok(self)
    }

    fn or_where_column(
        mut self,
        first: impl Into<Column>,
        operator: &str,
        second: impl Into<Column>,
    ) -> Result<Self> {
        let fragment = column_comparison(first, operator, second)?;
        self.push_where(fragment.with_connector(Connector::Or).into());
        Ok(self)
    }

    fn where_column_eq(mut self, first: impl Into<Column>, second: impl Into<Column>) -> Self {
        self.push_where(column_equals(first, second).with_connector(Connector::And).into());
        self
    }

    fn or_where_column_eq(mut self, first: impl Into<Column>, second: impl Into<Column>) -> Self {
        self.push_where(column_equals(first, second).with_connector(Connector::Or).into());
        self
    }

    /// Any of `columns` compares true: `AND (a op v OR b op v)`.
    fn where_any<I>(mut self, columns: I, operator: &str, value: impl Into<Value>) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<Column>,
    {
        let group = multi_column(columns, operator, value, Match::Any)?;
        self.push_where(group.with_connector(Connector::And).into());
        Ok(self)
    }

    /// All of `columns` compare true: `AND (a op v AND b op v)`.
    fn where_all<I>(mut self, columns: I, operator: &str, value: impl Into<Value>) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<Column>,
    {
        let group = multi_column(columns, operator, value, Match::All)?;
        self.push_where(group.with_connector(Connector::And).into());
        Ok(self)
    }

    /// None of `columns` compares true: `AND NOT (a op v OR b op v)`.
    fn where_none<I>(mut self, columns: I, operator: &str, value: impl Into<Value>) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<Column>,
    {
        let group = multi_column(columns, operator, value, Match::None)?;
        self.push_where(group.with_connector(Connector::And).into());
        Ok(self)
    }

    predicate_family! {
        push_where, where,
        /// `IS NULL`; the `not` variants test `IS NOT NULL`.
        fn null(column: impl Into<Column>) => |not| null_check(column, not)
    }

    predicate_family! {
        push_where, where,
        /// `IN (...)`; the `not` variants use `NOT IN`.
        fn in<I>(column: impl Into<Column>, values: I)
        where { I: IntoIterator, I::Item: Into<Value> }
        => |not| membership(column, values, not)
    }

    predicate_family! {
        push_where, where,
        /// `LIKE ?`; the `not` variants use `NOT LIKE`.
        fn like(column: impl Into<Column>, pattern: impl Into<Value>)
        => |not| like(column, pattern, not)
    }

    predicate_family! {
        push_where, where,
        /// `BETWEEN ? AND ?`; exactly two values.
        fn between<I>(column: impl Into<Column>, values: I)
        where { I: IntoIterator, I::Item: Into<Value> }
        => fallible |not| range(column, values, not)
    }

    predicate_family! {
        push_where, where,
        /// `BETWEEN a AND b` bounded by two columns.
        fn between_columns<I>(column: impl Into<Column>, columns: I)
        where { I: IntoIterator, I::Item: Into<Column> }
        => fallible |not| column_range(column, columns, not)
    }

    predicate_family! {
        push_where, where,
        /// `EXISTS (subquery)`, rendered when called.
        fn exists<S>(query: &S)
        where { S: Statement + ?Sized }
        => fallible |not| exists(query, not)
    }

    predicate_family! {
        push_where, where,
        /// A parenthesized group built by `f`. Empty groups render nothing.
        fn group<F>(f: F)
        where { F: FnOnce(WhereGroup) -> Result<WhereGroup> }
        => fallible |not| f(WhereGroup::new()).map(|group| finish_group(group.into_group(), not))
    }
}

/// Receives the predicates of a nested WHERE group.
#[derive(Debug, Clone)]
pub struct WhereGroup {
    group: Group,
}

impl WhereGroup {
    fn new() -> Self {
        Self {
            group: Group::new(Connector::And),
        }
    }

    pub fn into_group(self) -> Group {
        self.group
    }
}

impl WhereConditions for WhereGroup {
    #[inline]
    fn push_where(&mut self, entry: Entry) {
        self.group.push(entry);
    }
}

//------------------------------------------------------------------------------
// HAVING
//------------------------------------------------------------------------------

/// Predicate methods for the HAVING clause.
pub trait HavingConditions: Sized {
    /// Appends a finished entry to the HAVING predicate list.
    fn push_having(&mut self, entry: Entry);

    fn having(
        mut self,
        column: impl Into<Column>,
        operator: &str,
        value: impl Into<Value>,
    ) -> Result<Self> {
        self.push_having(comparison(column, operator, value)?.with_connector(Connector::And).into());
        Ok(self)
    }

    fn or_having(
        mut self,
        column: impl Into<Column>,
        operator: &str,
        value: impl Into<Value>,
    ) -> Result<Self> {
        self.push_having(comparison(column, operator, value)?.with_connector(Connector::Or).into());
        Ok(self)
    }

    /// `AND column = value`; a zero or empty value is still a value.
    fn having_eq(mut self, column: impl Into<Column>, value: impl Into<Value>) -> Self {
        self.push_having(equals(column, value).with_connector(Connector::And).into());
        self
    }

    fn or_having_eq(mut self, column: impl Into<Column>, value: impl Into<Value>) -> Self {
        self.push_having(equals(column, value).with_connector(Connector::Or).into());
        self
    }

    fn having_raw(mut self, sql: &str) -> Result<Self> {
        self.push_having(Fragment::raw(sql)?.with_connector(Connector::And).into());
        Ok(self)
    }

    fn or_having_raw(mut self, sql: &str) -> Result<Self> {
        self.push_having(Fragment::raw(sql)?.with_connector(Connector::Or).into());
        Ok(self)
    }

    fn having_raw_with<I>(mut self, sql: &str, bindings: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let fragment = Fragment::raw_with(sql, bindings)?;
        self.push_having(fragment.with_connector(Connector::And).into());
        Ok(self)
    }

    fn or_having_raw_with<I>(mut self, sql: &str, bindings: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let fragment = Fragment::raw_with(sql, bindings)?;
        self.push_having(fragment.with_connector(Connector::Or).into());
        Ok(self)
    }

    predicate_family! {
        push_having, having,
        /// `IS NULL`; the `not` variants test `IS NOT NULL`.
        fn null(column: impl Into<Column>) => |not| null_check(column, not)
    }

    predicate_family! {
        push_having, having,
        /// `IN (...)`; the `not` variants use `NOT IN`.
        fn in<I>(column: impl Into<Column>, values: I)
        where { I: IntoIterator, I::Item: Into<Value> }
        => |not| membership(column, values, not)
    }

    predicate_family! {
        push_having, having,
        /// `BETWEEN ? AND ?`; exactly two values.
        fn between<I>(column: impl Into<Column>, values: I)
        where { I: IntoIterator, I::Item: Into<Value> }
        => fallible |not| range(column, values, not)
    }

    predicate_family! {
        push_having, having,
        /// A parenthesized group built by `f`. Empty groups render nothing.
        fn group<F>(f: F)
        where { F: FnOnce(HavingGroup) -> Result<HavingGroup> }
        => fallible |not| f(HavingGroup::new()).map(|group| finish_group(group.into_group(), not))
    }
}

/// Receives the predicates of a nested HAVING group.
#[derive(Debug, Clone)]
pub struct HavingGroup {
    group: Group,
}

impl HavingGroup {
    fn new() -> Self {
        Self {
            group: Group::new(Connector::And),
        }
    }

    pub fn into_group(self) -> Group {
        self.group
    }
}

impl HavingConditions for HavingGroup {
    #[inline]
    fn push_having(&mut self, entry: Entry) {
        self.group.push(entry);
    }
}
