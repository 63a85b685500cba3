//! An in-memory [`Connection`] that records every call and answers from a
//! queue of canned responses.

#![allow(dead_code)]

use quarry::{Connection, Result, Row, Value};
use std::collections::VecDeque;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    FetchAll(String, Vec<Value>),
    FetchOne(String, Vec<Value>),
    Insert(String, Vec<Value>, bool),
    UpdateOrDelete(String, Vec<Value>),
}

impl Call {
    pub fn sql(&self) -> &str {
        match self {
            Call::FetchAll(sql, _)
            | Call::FetchOne(sql, _)
            | Call::Insert(sql, _, _)
            | Call::UpdateOrDelete(sql, _) => sql,
        }
    }

    pub fn params(&self) -> &[Value] {
        match self {
            Call::FetchAll(_, params)
            | Call::FetchOne(_, params)
            | Call::Insert(_, params, _)
            | Call::UpdateOrDelete(_, params) => params,
        }
    }
}

#[derive(Debug, Default)]
pub struct MockConnection {
    calls: Mutex<Vec<Call>>,
    rows: Mutex<VecDeque<Vec<Row>>>,
    next_id: Mutex<i64>,
    affected: Mutex<u64>,
}

impl MockConnection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the rows returned by the next fetch.
    pub fn with_rows(self, rows: Vec<Row>) -> Self {
        self.rows.lock().unwrap().push_back(rows);
        self
    }

    pub fn with_affected(self, affected: u64) -> Self {
        *self.affected.lock().unwrap() = affected;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_call(&self) -> Call {
        self.calls
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no statement was executed")
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn next_rows(&self) -> Vec<Row> {
        self.rows.lock().unwrap().pop_front().unwrap_or_default()
    }
}

impl Connection for MockConnection {
    async fn fetch_all(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>> {
        self.record(Call::FetchAll(sql.into(), params.to_vec()));
        Ok(self.next_rows())
    }

    async fn fetch_one(&self, sql: &str, params: &[Value]) -> Result<Option<Row>> {
        self.record(Call::FetchOne(sql.into(), params.to_vec()));
        Ok(self.next_rows().into_iter().next())
    }

    async fn insert(
        &self,
        sql: &str,
        params: &[Value],
        returning_id: bool,
    ) -> Result<Option<i64>> {
        self.record(Call::Insert(sql.into(), params.to_vec(), returning_id));
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        Ok(returning_id.then_some(*next_id))
    }

    async fn update_or_delete(&self, sql: &str, params: &[Value]) -> Result<u64> {
        self.record(Call::UpdateOrDelete(sql.into(), params.to_vec()));
        Ok(*self.affected.lock().unwrap())
    }
}

/// A single-column row.
pub fn row(column: &str, value: impl Into<Value>) -> Row {
    [(column, value.into())].into_iter().collect()
}
