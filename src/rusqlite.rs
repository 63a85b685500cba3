//! [`Connection`] for a blocking `rusqlite::Connection`.
//!
//! Statements run synchronously inside the returned futures.

use crate::connection::Connection;
use crate::row::Row;
use compact_str::CompactString;
use quarry_core::{Result, Value};
use rusqlite::params_from_iter;

fn column_names(stmt: &rusqlite::Statement<'_>) -> Vec<CompactString> {
    stmt.column_names()
        .into_iter()
        .map(CompactString::from)
        .collect()
}

fn read_row(columns: &[CompactString], row: &rusqlite::Row<'_>) -> rusqlite::Result<Row> {
    let mut out = Row::new();
    for (i, column) in columns.iter().enumerate() {
        out.push(column.clone(), row.get::<_, Value>(i)?);
    }
    Ok(out)
}

impl Connection for rusqlite::Connection {
    async fn fetch_all(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>> {
        quarry_core::quarry_trace_query!(sql, params.len());

        let mut stmt = self.prepare(sql)?;
        let columns = column_names(&stmt);
        let rows = stmt.query_map(params_from_iter(params), |row| read_row(&columns, row))?;

        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    async fn fetch_one(&self, sql: &str, params: &[Value]) -> Result<Option<Row>> {
        quarry_core::quarry_trace_query!(sql, params.len());

        let mut stmt = self.prepare(sql)?;
        let columns = column_names(&stmt);
        let mut rows = stmt.query(params_from_iter(params))?;

        match rows.next()? {
            Some(row) => Ok(Some(read_row(&columns, row)?)),
            None => Ok(None),
        }
    }

    async fn insert(
        &self,
        sql: &str,
        params: &[Value],
        returning_id: bool,
    ) -> Result<Option<i64>> {
        quarry_core::quarry_trace_query!(sql, params.len());

        self.execute(sql, params_from_iter(params))?;
        Ok(returning_id.then(|| self.last_insert_rowid()))
    }

    async fn update_or_delete(&self, sql: &str, params: &[Value]) -> Result<u64> {
        quarry_core::quarry_trace_query!(sql, params.len());

        let affected = self.execute(sql, params_from_iter(params))?;
        Ok(affected as u64)
    }
}
