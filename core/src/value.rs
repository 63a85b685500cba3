//! Scalar values and their literal SQL rendering.

use compact_str::CompactString;
use core::fmt::{self, Write};

//------------------------------------------------------------------------------
// Value Definition
//------------------------------------------------------------------------------

/// A scalar bound to a placeholder or inlined as a literal.
#[derive(Debug, Clone, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Value {
    /// NULL value
    #[default]
    Null,
    /// Boolean value, rendered as TRUE/FALSE
    Bool(bool),
    /// Integer value (i64)
    Integer(i64),
    /// Real value (f64)
    Real(f64),
    /// Text value
    Text(CompactString),
    /// Binary value
    Blob(Vec<u8>),
}

impl Value {
    /// Creates a blob value.
    ///
    /// `Vec<u8>` has no `From` impl so that byte lists stay usable as IN lists.
    #[inline]
    pub fn blob(bytes: impl Into<Vec<u8>>) -> Self {
        Value::Blob(bytes.into())
    }

    /// Returns true if this value is NULL.
    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the integer value if this is an INTEGER.
    #[inline]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the value as a float if it is numeric.
    #[inline]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Real(value) => Some(*value),
            Value::Integer(value) => Some(*value as f64),
            _ => None,
        }
    }

    /// Returns the boolean value, treating integers as SQLite does.
    #[inline]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(value) => Some(*value),
            Value::Integer(value) => Some(*value != 0),
            _ => None,
        }
    }

    /// Returns the text value if this is TEXT.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Returns the blob value if this is a BLOB.
    #[inline]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Blob(value) => Some(value.as_slice()),
            _ => None,
        }
    }

    /// Appends the SQL literal for this value to `buf`.
    pub fn write_literal(&self, buf: &mut String) {
        match self {
            Value::Null => buf.push_str("NULL"),
            Value::Bool(true) => buf.push_str("TRUE"),
            Value::Bool(false) => buf.push_str("FALSE"),
            Value::Integer(value) => {
                let _ = write!(buf, "{value}");
            }
            Value::Real(value) if value.is_finite() => {
                let _ = write!(buf, "{value}");
            }
            Value::Real(_) => buf.push_str("NULL"),
            Value::Text(value) => write_quoted(buf, value, '\''),
            Value::Blob(bytes) => {
                buf.push_str("X'");
                for byte in bytes {
                    let _ = write!(buf, "{byte:02X}");
                }
                buf.push('\'');
            }
        }
    }

    /// Returns the SQL literal for this value.
    pub fn to_literal(&self) -> String {
        let mut buf = String::new();
        self.write_literal(&mut buf);
        buf
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_literal())
    }
}

/// Comma-joins the literal rendering of each value: `1, 'a', NULL`.
pub fn render_literal_list<'v>(values: impl IntoIterator<Item = &'v Value>) -> String {
    let mut buf = String::new();
    for (i, value) in values.into_iter().enumerate() {
        if i > 0 {
            buf.push_str(", ");
        }
        value.write_literal(&mut buf);
    }
    buf
}

/// Wraps `text` in `quote`, doubling any embedded quote characters.
pub(crate) fn write_quoted(buf: &mut String, text: &str, quote: char) {
    buf.push(quote);
    for ch in text.chars() {
        if ch == quote {
            buf.push(quote);
        }
        buf.push(ch);
    }
    buf.push(quote);
}

//------------------------------------------------------------------------------
// Conversions
//------------------------------------------------------------------------------

macro_rules! impl_from_integer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                #[inline]
                fn from(value: $ty) -> Self {
                    Value::Integer(i64::from(value))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<isize> for Value {
    #[inline]
    fn from(value: isize) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<usize> for Value {
    #[inline]
    fn from(value: usize) -> Self {
        i64::try_from(value).map_or(Value::Real(value as f64), Value::Integer)
    }
}

impl From<u64> for Value {
    #[inline]
    fn from(value: u64) -> Self {
        i64::try_from(value).map_or(Value::Real(value as f64), Value::Integer)
    }
}

impl From<f32> for Value {
    #[inline]
    fn from(value: f32) -> Self {
        Value::Real(f64::from(value))
    }
}

impl From<f64> for Value {
    #[inline]
    fn from(value: f64) -> Self {
        Value::Real(value)
    }
}

impl From<bool> for Value {
    #[inline]
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<&str> for Value {
    #[inline]
    fn from(value: &str) -> Self {
        Value::Text(CompactString::from(value))
    }
}

impl From<String> for Value {
    #[inline]
    fn from(value: String) -> Self {
        Value::Text(CompactString::from(value))
    }
}

impl From<&String> for Value {
    #[inline]
    fn from(value: &String) -> Self {
        Value::Text(CompactString::from(value.as_str()))
    }
}

impl From<CompactString> for Value {
    #[inline]
    fn from(value: CompactString) -> Self {
        Value::Text(value)
    }
}

impl From<&Value> for Value {
    #[inline]
    fn from(value: &Value) -> Self {
        value.clone()
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    #[inline]
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

//------------------------------------------------------------------------------
// rusqlite implementations
//------------------------------------------------------------------------------

#[cfg(feature = "rusqlite")]
impl rusqlite::ToSql for Value {
    fn to_sql(&self) -> ::rusqlite::Result<::rusqlite::types::ToSqlOutput<'_>> {
        use rusqlite::types::{ToSqlOutput, Value as SqliteValue, ValueRef};

        Ok(match self {
            Value::Null => ToSqlOutput::Owned(SqliteValue::Null),
            Value::Bool(b) => ToSqlOutput::Owned(SqliteValue::Integer(i64::from(*b))),
            Value::Integer(i) => ToSqlOutput::Owned(SqliteValue::Integer(*i)),
            Value::Real(f) => ToSqlOutput::Owned(SqliteValue::Real(*f)),
            Value::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
            Value::Blob(b) => ToSqlOutput::Borrowed(ValueRef::Blob(b.as_slice())),
        })
    }
}

#[cfg(feature = "rusqlite")]
impl rusqlite::types::FromSql for Value {
    fn column_result(value: rusqlite::types::ValueRef<'_>) -> rusqlite::types::FromSqlResult<Self> {
        use rusqlite::types::ValueRef;

        let result = match value {
            ValueRef::Null => Value::Null,
            ValueRef::Integer(i) => Value::Integer(i),
            ValueRef::Real(r) => Value::Real(r),
            ValueRef::Text(items) => Value::Text(CompactString::from_utf8_lossy(items)),
            ValueRef::Blob(items) => Value::Blob(items.to_vec()),
        };
        Ok(result)
    }
}
