//! The execution seam between a rendered statement and a database.

use crate::row::Row;
use quarry_core::{Result, Value};

/// Executes parameterized SQL.
///
/// Every method receives SQL with `?` placeholders and the values for them in
/// order. Retries, timeouts and pooling belong to the implementation.
#[allow(async_fn_in_trait)]
pub trait Connection {
    /// Runs a query and returns every row.
    async fn fetch_all(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>>;

    /// Runs a query and returns the first row, if any.
    async fn fetch_one(&self, sql: &str, params: &[Value]) -> Result<Option<Row>>;

    /// Runs an INSERT, returning the new row id when `returning_id` is set.
    async fn insert(&self, sql: &str, params: &[Value], returning_id: bool)
    -> Result<Option<i64>>;

    /// Runs an UPDATE or DELETE and returns the affected row count.
    async fn update_or_delete(&self, sql: &str, params: &[Value]) -> Result<u64>;
}

impl<C: Connection + ?Sized> Connection for &C {
    #[inline]
    async fn fetch_all(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>> {
        (**self).fetch_all(sql, params).await
    }

    #[inline]
    async fn fetch_one(&self, sql: &str, params: &[Value]) -> Result<Option<Row>> {
        (**self).fetch_one(sql, params).await
    }

    #[inline]
    async fn insert(
        &self,
        sql: &str,
        params: &[Value],
        returning_id: bool,
    ) -> Result<Option<i64>> {
        (**self).insert(sql, params, returning_id).await
    }

    #[inline]
    async fn update_or_delete(&self, sql: &str, params: &[Value]) -> Result<u64> {
        (**self).update_or_delete(sql, params).await
    }
}
