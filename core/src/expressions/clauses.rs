//! Fragments for the non-predicate clauses.

use super::conditions::into_fragment;
use super::validate_operator;
use crate::error::Result;
use crate::fragment::{Connector, Fragment};
use crate::ident::{Column, write_identifier};
use crate::prepared::Prepared;
use crate::value::Value;
use core::fmt;

/// Sort direction for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Join flavours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
    Right,
    Cross,
}

impl JoinKind {
    #[inline]
    pub const fn keyword(self) -> &'static str {
        match self {
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Left => "LEFT JOIN",
            JoinKind::Right => "RIGHT JOIN",
            JoinKind::Cross => "CROSS JOIN",
        }
    }
}

/// A column in a comma-separated list (SELECT, GROUP BY).
pub fn list_item(column: impl Into<Column>) -> Fragment {
    column.into().into_fragment().with_connector(Connector::Comma)
}

/// An ORDER BY item: `` `name` DESC ``. Raw columns get the direction too;
/// ordering text that carries its own direction goes through `order_by_raw`.
pub fn order_item(column: impl Into<Column>, direction: Direction) -> Fragment {
    let mut out = Prepared::new();
    column.into().write_to(&mut out);
    out.push(' ');
    out.push_str(direction.as_str());
    into_fragment(out).with_connector(Connector::Comma)
}

/// A FROM target, optionally aliased: `` `users` AS `u` ``.
pub fn table(name: &str, alias: Option<&str>) -> Fragment {
    let mut sql = String::new();
    write_identifier(&mut sql, name);
    if let Some(alias) = alias {
        sql.push_str(" AS ");
        write_identifier(&mut sql, alias);
    }
    Fragment::text(sql)
}

/// `INNER JOIN `posts` ON `users`.`id` = `posts`.`user_id``
pub fn join(
    kind: JoinKind,
    table: &str,
    first: impl Into<Column>,
    operator: &str,
    second: impl Into<Column>,
) -> Result<Fragment> {
    let operator = validate_operator(operator)?;
    let mut out = Prepared::new();
    out.push_str(kind.keyword());
    out.push(' ');
    write_identifier(&mut out.sql, table);
    out.push_str(" ON ");
    first.into().write_to(&mut out);
    out.push(' ');
    out.push_str(operator);
    out.push(' ');
    second.into().write_to(&mut out);
    Ok(into_fragment(out))
}

/// `CROSS JOIN `comments``
pub fn cross_join(table: &str) -> Fragment {
    let mut sql = String::from(JoinKind::Cross.keyword());
    sql.push(' ');
    write_identifier(&mut sql, table);
    Fragment::text(sql)
}

/// A bound LIMIT/OFFSET count.
pub fn count_param(n: u64) -> Fragment {
    let mut out = Prepared::new();
    out.push_param(Value::from(n));
    into_fragment(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_items() {
        assert_eq!(order_item("name", Direction::Desc).render_literal(false), "`name` DESC");
        assert_eq!(order_item("name", Direction::Asc).render_literal(true), ", `name` ASC");

        let raw = Column::raw("length(name)").unwrap();
        assert_eq!(order_item(raw, Direction::Desc).sql(), "length(name) DESC");

        let bound = Column::Raw(Fragment::raw_with("score * ?", [2]).unwrap());
        let item = order_item(bound, Direction::Asc);
        assert_eq!(item.sql(), "score * ? ASC");
        assert_eq!(item.render_literal(false), "score * 2 ASC");
    }

    #[test]
    fn test_joins() {
        let inner = join(JoinKind::Inner, "posts", "users.id", "=", "posts.user_id").unwrap();
        assert_eq!(
            inner.sql(),
            "INNER JOIN `posts` ON `users`.`id` = `posts`.`user_id`"
        );
        assert!(join(JoinKind::Left, "posts", "a", "LIKE", "b").is_err());
        assert_eq!(cross_join("comments").sql(), "CROSS JOIN `comments`");
    }

    #[test]
    fn test_table_alias() {
        assert_eq!(table("users", None).sql(), "`users`");
        assert_eq!(table("users", Some("u")).sql(), "`users` AS `u`");
    }

    #[test]
    fn test_count_param() {
        let fragment = count_param(5);
        assert_eq!(fragment.sql(), "?");
        assert_eq!(fragment.render_literal(false), "5");
    }
}
