//! Clause containers and parenthesized groups.
//!
//! A [`ClauseBuilder`] holds the ordered entries of one SQL clause and renders
//! them in a single walk that produces the parameterized form; the literal
//! form is always projected from that walk (see [`Prepared::to_literal`]), so
//! the two can never disagree on connectors or parentheses.

use crate::error::{QueryError, Result};
use crate::fragment::{Connector, Fragment, write_prefix};
use crate::prepared::Prepared;
use core::fmt;

//------------------------------------------------------------------------------
// ClauseKind
//------------------------------------------------------------------------------

/// The clause a container renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClauseKind {
    Select,
    From,
    Join,
    Where,
    GroupBy,
    Having,
    OrderBy,
    Limit,
    Offset,
    /// Anonymous container backing a [`Group`]
    None,
}

impl ClauseKind {
    /// Every top-level clause in rendering order.
    pub const ORDERED: [ClauseKind; 9] = [
        ClauseKind::Select,
        ClauseKind::From,
        ClauseKind::Join,
        ClauseKind::Where,
        ClauseKind::GroupBy,
        ClauseKind::Having,
        ClauseKind::OrderBy,
        ClauseKind::Limit,
        ClauseKind::Offset,
    ];

    /// Keyword prefixed to a non-empty rendering.
    #[inline]
    pub const fn keyword(self) -> Option<&'static str> {
        match self {
            ClauseKind::Select => Some("SELECT"),
            ClauseKind::From => Some("FROM"),
            ClauseKind::Where => Some("WHERE"),
            ClauseKind::GroupBy => Some("GROUP BY"),
            ClauseKind::Having => Some("HAVING"),
            ClauseKind::OrderBy => Some("ORDER BY"),
            ClauseKind::Limit => Some("LIMIT"),
            ClauseKind::Offset => Some("OFFSET"),
            ClauseKind::Join | ClauseKind::None => None,
        }
    }

    /// Token between rendered entries. List clauses carry `, ` in their
    /// connectors and join with nothing.
    #[inline]
    pub const fn join_token(self) -> &'static str {
        match self {
            ClauseKind::Select | ClauseKind::GroupBy | ClauseKind::OrderBy => "",
            _ => " ",
        }
    }

    /// Body used when no entry renders.
    #[inline]
    pub const fn default_fragment(self) -> Option<&'static str> {
        match self {
            ClauseKind::Select => Some("*"),
            _ => None,
        }
    }

    /// Whether a push replaces the previous entry instead of appending.
    #[inline]
    pub const fn replaces(self) -> bool {
        matches!(self, ClauseKind::Limit | ClauseKind::Offset)
    }

    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            ClauseKind::Select => "select",
            ClauseKind::From => "from",
            ClauseKind::Join => "join",
            ClauseKind::Where => "where",
            ClauseKind::GroupBy => "groupBy",
            ClauseKind::Having => "having",
            ClauseKind::OrderBy => "orderBy",
            ClauseKind::Limit => "limit",
            ClauseKind::Offset => "offset",
            ClauseKind::None => "none",
        }
    }
}

impl fmt::Display for ClauseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

//------------------------------------------------------------------------------
// Entry
//------------------------------------------------------------------------------

/// One item of a container.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Fragment(Fragment),
    Group(Group),
}

impl Entry {
    /// Sets the connector used when this entry is not first.
    #[inline]
    pub fn with_connector(self, connector: Connector) -> Self {
        match self {
            Entry::Fragment(fragment) => Entry::Fragment(fragment.with_connector(connector)),
            Entry::Group(group) => Entry::Group(group.with_connector(connector)),
        }
    }

    #[inline]
    pub fn negate(self) -> Self {
        match self {
            Entry::Fragment(fragment) => Entry::Fragment(fragment.negate()),
            Entry::Group(group) => Entry::Group(group.negate()),
        }
    }

    #[inline]
    pub fn write_to(&self, out: &mut Prepared, leading: bool) {
        match self {
            Entry::Fragment(fragment) => fragment.write_to(out, leading),
            Entry::Group(group) => group.write_to(out, leading),
        }
    }

    #[inline]
    pub fn prepare(&self, leading: bool) -> Prepared {
        let mut out = Prepared::new();
        self.write_to(&mut out, leading);
        out
    }
}

impl From<Fragment> for Entry {
    #[inline]
    fn from(value: Fragment) -> Self {
        Entry::Fragment(value)
    }
}

impl From<Group> for Entry {
    #[inline]
    fn from(value: Group) -> Self {
        Entry::Group(value)
    }
}

/// Renders `entries` in order: empty ones are dropped, the first survivor
/// goes without its connector and the rest are joined by `join_token`.
fn write_entries(entries: &[Entry], join_token: &str, out: &mut Prepared) {
    let mut first = true;
    for entry in entries {
        let rendered = entry.prepare(!first);
        if rendered.is_empty() {
            continue;
        }
        if !first {
            out.push_str(join_token);
        }
        out.append(rendered);
        first = false;
    }
}

//------------------------------------------------------------------------------
// ClauseBuilder
//------------------------------------------------------------------------------

/// Ordered entries for a single clause.
#[derive(Debug, Clone, PartialEq)]
pub struct ClauseBuilder {
    kind: ClauseKind,
    entries: Vec<Entry>,
    distinct: bool,
}

impl ClauseBuilder {
    #[inline]
    pub const fn new(kind: ClauseKind) -> Self {
        Self {
            kind,
            entries: Vec::new(),
            distinct: false,
        }
    }

    #[inline]
    pub const fn kind(&self) -> ClauseKind {
        self.kind
    }

    #[inline]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// True when nothing was pushed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub const fn is_distinct(&self) -> bool {
        self.distinct
    }

    /// Appends an entry, or replaces the current one for LIMIT and OFFSET.
    pub fn push(&mut self, entry: impl Into<Entry>) -> &mut Self {
        if self.kind.replaces() {
            self.entries.clear();
        }
        self.entries.push(entry.into());
        self
    }

    /// Toggles `DISTINCT`. Only SELECT containers accept it.
    pub fn set_distinct(&mut self, distinct: bool) -> Result<&mut Self> {
        if self.kind != ClauseKind::Select {
            return Err(QueryError::DistinctNotAllowed(self.kind));
        }
        self.distinct = distinct;
        Ok(self)
    }

    /// Joined entries without keyword or default.
    pub fn prepare_body(&self) -> Prepared {
        let mut out = Prepared::new();
        write_entries(&self.entries, self.kind.join_token(), &mut out);
        out
    }

    /// Full clause: keyword, optional `DISTINCT`, body or default.
    pub fn prepare(&self) -> Prepared {
        let mut body = self.prepare_body();
        if body.is_empty() {
            match self.kind.default_fragment() {
                Some(default) => body.push_str(default),
                None => return body,
            }
        }

        let Some(keyword) = self.kind.keyword() else {
            return body;
        };

        let mut out = Prepared::new();
        out.push_str(keyword);
        if self.distinct && self.kind.default_fragment() != Some(body.sql()) {
            out.push_str(" DISTINCT");
        }
        out.push(' ');
        out.append(body);
        out
    }

    #[inline]
    pub fn render_literal(&self) -> String {
        self.prepare().to_literal()
    }
}

//------------------------------------------------------------------------------
// Group
//------------------------------------------------------------------------------

/// A parenthesized sub-sequence with its own connector.
///
/// Renders nothing at all when none of its entries render.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    inner: ClauseBuilder,
    connector: Connector,
    negated: bool,
}

impl Group {
    #[inline]
    pub const fn new(connector: Connector) -> Self {
        Self {
            inner: ClauseBuilder::new(ClauseKind::None),
            connector,
            negated: false,
        }
    }

    #[inline]
    pub fn push(&mut self, entry: impl Into<Entry>) -> &mut Self {
        self.inner.push(entry);
        self
    }

    #[inline]
    pub fn with_connector(mut self, connector: Connector) -> Self {
        self.connector = connector;
        self
    }

    #[inline]
    pub fn negate(mut self) -> Self {
        self.negated = true;
        self
    }

    #[inline]
    pub const fn connector(&self) -> Connector {
        self.connector
    }

    #[inline]
    pub const fn is_negated(&self) -> bool {
        self.negated
    }

    #[inline]
    pub fn entries(&self) -> &[Entry] {
        self.inner.entries()
    }

    /// True when the group would render nothing.
    pub fn is_empty(&self) -> bool {
        self.inner.prepare_body().is_empty()
    }

    pub fn write_to(&self, out: &mut Prepared, leading: bool) {
        let body = self.inner.prepare_body();
        if body.is_empty() {
            return;
        }
        write_prefix(out, Some(self.connector), self.negated, leading);
        out.push('(');
        out.append(body);
        out.push(')');
    }

    pub fn prepare(&self, leading: bool) -> Prepared {
        let mut out = Prepared::new();
        self.write_to(&mut out, leading);
        out
    }

    #[inline]
    pub fn render_literal(&self, leading: bool) -> String {
        self.prepare(leading).to_literal()
    }
}
