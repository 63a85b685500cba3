//! Result rows returned by a [`Connection`](crate::Connection).

use compact_str::CompactString;
use hashbrown::HashMap;
use quarry_core::Value;

/// One result row: column names and values in select order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: Vec<CompactString>,
    values: Vec<Value>,
    index: HashMap<CompactString, usize>,
}

impl Row {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a column. A repeated name keeps pointing at its first position.
    pub fn push(&mut self, column: impl Into<CompactString>, value: impl Into<Value>) {
        let column = column.into();
        self.index
            .entry(column.clone())
            .or_insert(self.values.len());
        self.columns.push(column);
        self.values.push(value.into());
    }

    /// Value of the named column.
    #[inline]
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.index.get(column).map(|&i| &self.values[i])
    }

    /// Value at a zero-based position.
    #[inline]
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    #[inline]
    pub fn columns(&self) -> &[CompactString] {
        &self.columns
    }

    #[inline]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns
            .iter()
            .map(CompactString::as_str)
            .zip(self.values.iter())
    }

    #[inline]
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

impl<K, V> FromIterator<(K, V)> for Row
where
    K: Into<CompactString>,
    V: Into<Value>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut row = Row::new();
        for (column, value) in iter {
            row.push(column, value);
        }
        row
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Row {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (column, value) in self.iter() {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}
