//! The atomic renderable unit: SQL text, its bindings and a connector.

use crate::error::{QueryError, Result};
use crate::prepared::{Prepared, count_placeholders};
use crate::value::Value;
use compact_str::CompactString;
use core::fmt;
use smallvec::SmallVec;

/// Token placed ahead of a non-first entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Connector {
    And,
    Or,
    /// List separator for SELECT, GROUP BY and ORDER BY entries
    Comma,
}

impl Connector {
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Connector::And => "AND",
            Connector::Or => "OR",
            Connector::Comma => ",",
        }
    }
}

impl fmt::Display for Connector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// SQL text with positional placeholders and the values bound to them.
///
/// The number of `?` markers in the text always equals the number of
/// bindings. Fragments built from trusted pieces go through the crate's
/// constructors; caller-supplied text goes through [`Fragment::raw`], which
/// checks the count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fragment {
    sql: CompactString,
    bindings: SmallVec<[Value; 4]>,
    connector: Option<Connector>,
    negated: bool,
}

impl Fragment {
    // ==================== constructors ====================

    /// Creates a fragment from caller-supplied SQL without bindings.
    #[inline]
    pub fn raw(sql: impl Into<CompactString>) -> Result<Self> {
        Self::raw_with(sql, core::iter::empty::<Value>())
    }

    /// Creates a fragment from caller-supplied SQL and its bindings.
    ///
    /// This is the only way to get unescaped text into a statement.
    pub fn raw_with<I>(sql: impl Into<CompactString>, bindings: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let sql = sql.into();
        let bindings: SmallVec<[Value; 4]> = bindings.into_iter().map(Into::into).collect();
        let placeholders = count_placeholders(&sql);
        if placeholders != bindings.len() {
            return Err(QueryError::PlaceholderMismatch {
                placeholders,
                bindings: bindings.len(),
            });
        }
        Ok(Self {
            sql,
            bindings,
            connector: None,
            negated: false,
        })
    }

    /// Text without bindings.
    #[inline]
    pub(crate) fn text(sql: impl Into<CompactString>) -> Self {
        Self {
            sql: sql.into(),
            ..Self::default()
        }
    }

    /// Text with bindings whose placeholders were generated alongside them.
    #[inline]
    pub(crate) fn bound(sql: impl Into<CompactString>, bindings: SmallVec<[Value; 4]>) -> Self {
        let sql = sql.into();
        debug_assert_eq!(count_placeholders(&sql), bindings.len());
        Self {
            sql,
            bindings,
            connector: None,
            negated: false,
        }
    }

    // ==================== modifiers ====================

    /// Sets the connector used when this fragment is not first.
    #[inline]
    pub fn with_connector(mut self, connector: Connector) -> Self {
        self.connector = Some(connector);
        self
    }

    /// Prefixes the rendered text with `NOT`.
    #[inline]
    pub fn negate(mut self) -> Self {
        self.negated = true;
        self
    }

    // ==================== accessors ====================

    #[inline]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    #[inline]
    pub fn bindings(&self) -> &[Value] {
        &self.bindings
    }

    #[inline]
    pub const fn connector(&self) -> Option<Connector> {
        self.connector
    }

    #[inline]
    pub const fn is_negated(&self) -> bool {
        self.negated
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }

    // ==================== rendering ====================

    /// Writes the parameterized form, with the connector when `leading`.
    pub fn write_to(&self, out: &mut Prepared, leading: bool) {
        if self.is_empty() {
            return;
        }
        write_prefix(out, self.connector, self.negated, leading);
        out.push_str(&self.sql);
        out.params.extend(self.bindings.iter().cloned());
    }

    /// Parameterized rendering.
    pub fn prepare(&self, leading: bool) -> Prepared {
        let mut out = Prepared::new();
        self.write_to(&mut out, leading);
        out
    }

    /// Literal rendering.
    pub fn render_literal(&self, leading: bool) -> String {
        self.prepare(leading).to_literal()
    }
}

/// Writes `"{connector} "` when leading, then `"NOT "` when negated.
pub(crate) fn write_prefix(
    out: &mut Prepared,
    connector: Option<Connector>,
    negated: bool,
    leading: bool,
) {
    if leading && let Some(connector) = connector {
        out.push_str(connector.as_str());
        out.push(' ');
    }
    if negated {
        out.push_str("NOT ");
    }
}
