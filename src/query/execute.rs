//! Async terminal operations that hand a rendered [`Query`] to a
//! [`Connection`].

use super::{Query, WhereConditions};
use crate::connection::Connection;
use crate::row::Row;
use quarry_core::{
    AGGREGATE_COLUMN, Aggregate, AggregateFn, ClauseKind, Column, Exists, Result, Statement,
    Value,
};

impl Query {
    /// Base statement for an aggregate. The select list is dropped unless a
    /// HAVING clause may reference it.
    fn aggregate_base(&self) -> Query {
        if self.clause(ClauseKind::Having).is_empty() {
            self.clone_without(&[ClauseKind::Select])
        } else {
            self.clone()
        }
    }

    async fn aggregate<C>(
        &self,
        conn: &C,
        function: AggregateFn,
        column: Option<Column>,
    ) -> Result<Value>
    where
        C: Connection + ?Sized,
    {
        let aggregate = Aggregate::new(self.aggregate_base(), function, column)?;
        let prepared = aggregate.prepare()?;

        let row = conn.fetch_one(prepared.sql(), prepared.params()).await?;
        Ok(row
            .and_then(|row| row.get(AGGREGATE_COLUMN).cloned())
            .filter(|value| !value.is_null())
            .unwrap_or(Value::Integer(0)))
    }

    /// Runs the SELECT and returns every row.
    pub async fn get<C>(&self, conn: &C) -> Result<Vec<Row>>
    where
        C: Connection + ?Sized,
    {
        let prepared = self.prepare()?;
        conn.fetch_all(prepared.sql(), prepared.params()).await
    }

    /// Runs the SELECT with `LIMIT 1`.
    pub async fn first<C>(&self, conn: &C) -> Result<Option<Row>>
    where
        C: Connection + ?Sized,
    {
        let prepared = self.clone().limit(1).prepare()?;
        conn.fetch_one(prepared.sql(), prepared.params()).await
    }

    /// First row whose `id` equals `id`.
    pub async fn find<C>(&self, conn: &C, id: impl Into<Value>) -> Result<Option<Row>>
    where
        C: Connection + ?Sized,
    {
        self.clone().where_eq("id", id).first(conn).await
    }

    /// [`Query::get`] with `columns` added to the select list.
    pub async fn get_columns<C, I>(&self, conn: &C, columns: I) -> Result<Vec<Row>>
    where
        C: Connection + ?Sized,
        I: IntoIterator,
        I::Item: Into<Column>,
    {
        self.clone().select(columns).get(conn).await
    }

    /// [`Query::first`] with `columns` added to the select list.
    pub async fn first_columns<C, I>(&self, conn: &C, columns: I) -> Result<Option<Row>>
    where
        C: Connection + ?Sized,
        I: IntoIterator,
        I::Item: Into<Column>,
    {
        self.clone().select(columns).first(conn).await
    }

    pub async fn find_columns<C, I>(
        &self,
        conn: &C,
        id: impl Into<Value>,
        columns: I,
    ) -> Result<Option<Row>>
    where
        C: Connection + ?Sized,
        I: IntoIterator,
        I::Item: Into<Column>,
    {
        self.clone().where_eq("id", id).select(columns).first(conn).await
    }

    /// `COUNT(*)` over the query.
    pub async fn count<C>(&self, conn: &C) -> Result<i64>
    where
        C: Connection + ?Sized,
    {
        let value = self.aggregate(conn, AggregateFn::Count, None).await?;
        Ok(value.as_i64().unwrap_or_default())
    }

    /// `COUNT(column)` over the query.
    pub async fn count_column<C>(&self, conn: &C, column: impl Into<Column>) -> Result<i64>
    where
        C: Connection + ?Sized,
    {
        let value = self
            .aggregate(conn, AggregateFn::Count, Some(column.into()))
            .await?;
        Ok(value.as_i64().unwrap_or_default())
    }

    pub async fn sum<C>(&self, conn: &C, column: impl Into<Column>) -> Result<Value>
    where
        C: Connection + ?Sized,
    {
        self.aggregate(conn, AggregateFn::Sum, Some(column.into())).await
    }

    pub async fn avg<C>(&self, conn: &C, column: impl Into<Column>) -> Result<Value>
    where
        C: Connection + ?Sized,
    {
        self.aggregate(conn, AggregateFn::Avg, Some(column.into())).await
    }

    /// Alias of [`Query::avg`].
    #[inline]
    pub async fn average<C>(&self, conn: &C, column: impl Into<Column>) -> Result<Value>
    where
        C: Connection + ?Sized,
    {
        self.avg(conn, column).await
    }

    pub async fn min<C>(&self, conn: &C, column: impl Into<Column>) -> Result<Value>
    where
        C: Connection + ?Sized,
    {
        self.aggregate(conn, AggregateFn::Min, Some(column.into())).await
    }

    pub async fn max<C>(&self, conn: &C, column: impl Into<Column>) -> Result<Value>
    where
        C: Connection + ?Sized,
    {
        self.aggregate(conn, AggregateFn::Max, Some(column.into())).await
    }

    /// `SELECT EXISTS(...)` over the query.
    pub async fn exists<C>(&self, conn: &C) -> Result<bool>
    where
        C: Connection + ?Sized,
    {
        let prepared = Exists(self).prepare()?;

        let row = conn.fetch_one(prepared.sql(), prepared.params()).await?;
        Ok(row
            .as_ref()
            .and_then(|row| row.get_index(0))
            .and_then(Value::as_bool)
            .unwrap_or(false))
    }

    pub async fn doesnt_exist<C>(&self, conn: &C) -> Result<bool>
    where
        C: Connection + ?Sized,
    {
        Ok(!self.exists(conn).await?)
    }

    /// Inserts one row into the target table.
    pub async fn insert<C, I, K, V>(&self, conn: &C, fields: I) -> Result<()>
    where
        C: Connection + ?Sized,
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let prepared = self.prepare_insert(fields)?;
        conn.insert(prepared.sql(), prepared.params(), false).await?;
        Ok(())
    }

    /// Inserts one row and returns the id the database assigned to it.
    pub async fn insert_get_id<C, I, K, V>(&self, conn: &C, fields: I) -> Result<Option<i64>>
    where
        C: Connection + ?Sized,
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let prepared = self.prepare_insert(fields)?;
        conn.insert(prepared.sql(), prepared.params(), true).await
    }

    /// Updates the matching rows and returns how many were affected.
    pub async fn update<C, I, K, V>(&self, conn: &C, fields: I) -> Result<u64>
    where
        C: Connection + ?Sized,
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let prepared = self.prepare_update(fields)?;
        conn.update_or_delete(prepared.sql(), prepared.params()).await
    }

    /// Deletes the matching rows and returns how many were affected.
    pub async fn delete<C>(&self, conn: &C) -> Result<u64>
    where
        C: Connection + ?Sized,
    {
        let prepared = self.prepare_delete()?;
        conn.update_or_delete(prepared.sql(), prepared.params()).await
    }
}
