//! Identifier quoting and column references.

use crate::error::Result;
use crate::fragment::Fragment;
use crate::prepared::Prepared;
use crate::value::write_quoted;
use compact_str::CompactString;

/// Identifier quote character.
pub const IDENT_QUOTE: char = '`';

/// Appends `column` as a quoted, dot-path-aware identifier.
///
/// Each `.` segment is quoted on its own and `*` is left bare, so
/// `users.id` becomes `` `users`.`id` `` and `users.*` becomes `` `users`.* ``.
/// A trailing ` as alias` is rendered as `` AS `alias` ``.
pub fn write_identifier(buf: &mut String, column: &str) {
    let (path, alias) = split_alias(column);
    write_path(buf, path);
    if let Some(alias) = alias {
        buf.push_str(" AS ");
        write_quoted(buf, alias, IDENT_QUOTE);
    }
}

/// Returns `column` as a quoted identifier.
pub fn render_identifier(column: &str) -> String {
    let mut buf = String::with_capacity(column.len() + 4);
    write_identifier(&mut buf, column);
    buf
}

fn write_path(buf: &mut String, path: &str) {
    for (i, segment) in path.split('.').enumerate() {
        if i > 0 {
            buf.push('.');
        }
        if segment == "*" {
            buf.push('*');
        } else {
            write_quoted(buf, segment, IDENT_QUOTE);
        }
    }
}

fn split_alias(column: &str) -> (&str, Option<&str>) {
    let trimmed = column.trim();
    let lower = trimmed.to_ascii_lowercase();
    match lower.rfind(" as ") {
        Some(at) => {
            let alias = trimmed[at + 4..].trim();
            if alias.is_empty() {
                (trimmed, None)
            } else {
                (trimmed[..at].trim_end(), Some(alias))
            }
        }
        None => (trimmed, None),
    }
}

//------------------------------------------------------------------------------
// Column
//------------------------------------------------------------------------------

/// A column reference: a name to quote or a raw expression to emit verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    /// Quoted per dot segment
    Name(CompactString),
    /// Emitted as-is, bindings carried along
    Raw(Fragment),
}

impl Column {
    /// Creates a raw column expression without bindings.
    #[inline]
    pub fn raw(sql: impl Into<CompactString>) -> Result<Self> {
        Ok(Column::Raw(Fragment::raw(sql)?))
    }

    /// Writes the column, quoting names and carrying raw bindings.
    pub fn write_to(&self, out: &mut Prepared) {
        match self {
            Column::Name(name) => write_identifier(&mut out.sql, name),
            Column::Raw(fragment) => fragment.write_to(out, false),
        }
    }

    /// Renders this column into a fragment, quoting names.
    pub fn into_fragment(self) -> Fragment {
        match self {
            Column::Name(name) => Fragment::text(render_identifier(&name)),
            Column::Raw(fragment) => fragment,
        }
    }
}

impl From<&str> for Column {
    #[inline]
    fn from(value: &str) -> Self {
        Column::Name(CompactString::from(value))
    }
}

impl From<String> for Column {
    #[inline]
    fn from(value: String) -> Self {
        Column::Name(CompactString::from(value))
    }
}

impl From<&String> for Column {
    #[inline]
    fn from(value: &String) -> Self {
        Column::Name(CompactString::from(value.as_str()))
    }
}

impl From<CompactString> for Column {
    #[inline]
    fn from(value: CompactString) -> Self {
        Column::Name(value)
    }
}

impl From<Fragment> for Column {
    #[inline]
    fn from(value: Fragment) -> Self {
        Column::Raw(value)
    }
}
