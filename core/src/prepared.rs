//! The parameterized rendering of a statement and its literal projection.

use crate::error::Result;
use crate::value::Value;
use core::fmt;
use smallvec::SmallVec;

/// Positional placeholder marker.
pub const PLACEHOLDER: char = '?';

/// Byte offsets of the placeholder markers in `sql`.
///
/// A `?` inside a backtick-quoted identifier or a quoted string is not a
/// marker. Doubled quote characters close and reopen the span, so escaped
/// quotes need no special case.
fn placeholder_offsets(sql: &str) -> impl Iterator<Item = usize> + '_ {
    let mut quote: Option<char> = None;
    sql.char_indices().filter_map(move |(offset, ch)| {
        match quote {
            Some(open) if ch == open => quote = None,
            Some(_) => {}
            None if matches!(ch, '`' | '\'' | '"') => quote = Some(ch),
            None if ch == PLACEHOLDER => return Some(offset),
            None => {}
        }
        None
    })
}

/// Counts placeholder markers in `sql`, ignoring quoted `?`.
#[inline]
pub fn count_placeholders(sql: &str) -> usize {
    placeholder_offsets(sql).count()
}

/// SQL text with `?` placeholders and the values bound to them, in order.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Prepared {
    /// SQL with positional placeholders
    pub sql: String,
    /// Values for each placeholder, left to right
    pub params: SmallVec<[Value; 8]>,
}

impl Prepared {
    #[inline]
    pub const fn new() -> Self {
        Self {
            sql: String::new(),
            params: SmallVec::new_const(),
        }
    }

    #[inline]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    #[inline]
    pub fn params(&self) -> &[Value] {
        &self.params
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }

    #[inline]
    pub fn into_parts(self) -> (String, SmallVec<[Value; 8]>) {
        (self.sql, self.params)
    }

    #[inline]
    pub fn push_str(&mut self, sql: &str) {
        self.sql.push_str(sql);
    }

    #[inline]
    pub fn push(&mut self, ch: char) {
        self.sql.push(ch);
    }

    /// Appends a placeholder bound to `value`.
    #[inline]
    pub fn push_param(&mut self, value: Value) {
        self.sql.push(PLACEHOLDER);
        self.params.push(value);
    }

    /// Appends another rendering, keeping parameter order.
    pub fn append(&mut self, other: Prepared) {
        self.sql.push_str(&other.sql);
        self.params.extend(other.params);
    }

    /// Appends `other` separated by `sep`, skipping empty renderings.
    pub fn append_with(&mut self, sep: &str, other: Prepared) {
        if other.is_empty() {
            return;
        }
        if !self.is_empty() {
            self.sql.push_str(sep);
        }
        self.append(other);
    }

    /// Inlines every parameter as a SQL literal.
    ///
    /// Markers beyond the last parameter are left as `?`.
    pub fn to_literal(&self) -> String {
        let mut buf = String::with_capacity(self.sql.len() + self.params.len() * 4);
        let mut params = self.params.iter();
        let mut start = 0;
        for offset in placeholder_offsets(&self.sql) {
            buf.push_str(&self.sql[start..offset]);
            match params.next() {
                Some(value) => value.write_literal(&mut buf),
                None => buf.push(PLACEHOLDER),
            }
            start = offset + PLACEHOLDER.len_utf8();
        }
        buf.push_str(&self.sql[start..]);
        buf
    }
}

impl fmt::Display for Prepared {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}

/// A complete statement that can be rendered in both modes.
pub trait Statement {
    /// Renders the parameterized form.
    fn prepare(&self) -> Result<Prepared>;

    /// Renders the literal form.
    fn to_sql_string(&self) -> Result<String> {
        Ok(self.prepare()?.to_literal())
    }
}

impl<S: Statement + ?Sized> Statement for &S {
    #[inline]
    fn prepare(&self) -> Result<Prepared> {
        (**self).prepare()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_literal_substitutes_in_order() {
        let mut prepared = Prepared::new();
        prepared.push_str("WHERE name = ");
        prepared.push_param(Value::from("John"));
        prepared.push_str(" AND age > ");
        prepared.push_param(Value::from(20));

        assert_eq!(prepared.sql(), "WHERE name = ? AND age > ?");
        assert_eq!(prepared.to_literal(), "WHERE name = 'John' AND age > 20");
    }

    #[test]
    fn test_to_literal_does_not_rescan_substituted_values() {
        let mut prepared = Prepared::new();
        prepared.push_param(Value::from("?"));
        prepared.push_str(" = ");
        prepared.push_param(Value::from(1));

        assert_eq!(prepared.to_literal(), "'?' = 1");
    }

    #[test]
    fn test_quoted_question_marks_are_not_placeholders() {
        assert_eq!(count_placeholders("`why?` = ?"), 1);
        assert_eq!(count_placeholders("name = '?' AND `a``?` = ?"), 1);
        assert_eq!(count_placeholders("\"col?\" IS NULL"), 0);
        assert_eq!(count_placeholders("a = ? AND b = ?"), 2);

        let mut prepared = Prepared::new();
        prepared.push_str("SELECT * FROM `t?` WHERE `a` = ");
        prepared.push_param(Value::from(1));
        prepared.push_str(" AND b <> '?'");

        assert_eq!(
            prepared.to_literal(),
            "SELECT * FROM `t?` WHERE `a` = 1 AND b <> '?'"
        );
    }

    #[test]
    fn test_append_with_skips_empty() {
        let mut out = Prepared::new();
        out.append_with(" ", Prepared::new());
        assert!(out.is_empty());

        let mut left = Prepared::new();
        left.push_str("SELECT *");
        let mut right = Prepared::new();
        right.push_str("LIMIT ");
        right.push_param(Value::from(1));
        left.append_with(" ", right);

        assert_eq!(left.sql(), "SELECT * LIMIT ?");
        assert_eq!(left.params(), &[Value::from(1)]);
        assert_eq!(count_placeholders(left.sql()), left.params().len());
    }
}
