//! Predicate fragments for WHERE and HAVING.

use super::{validate_operator, validate_pattern_operator, validate_range_len};
use crate::builder::Group;
use crate::error::{QueryError, Result};
use crate::fragment::{Connector, Fragment};
use crate::ident::Column;
use crate::prepared::{Prepared, Statement};
use crate::value::Value;

/// Turns a rendering built alongside its bindings into a fragment.
#[inline]
pub(crate) fn into_fragment(out: Prepared) -> Fragment {
    let (sql, params) = out.into_parts();
    Fragment::bound(sql, params.into_iter().collect())
}

/// `{column} {operator} ?` without validating the operator.
fn compare(column: &Column, operator: &str, value: Value) -> Fragment {
    let mut out = Prepared::new();
    column.write_to(&mut out);
    out.push(' ');
    out.push_str(operator);
    out.push(' ');
    out.push_param(value);
    into_fragment(out)
}

/// Create a comparison against a value: `` `age` > ? ``
///
/// # Example
/// ```
/// # use quarry_core::expressions::comparison;
/// let fragment = comparison("age", ">", 20).unwrap();
/// assert_eq!(fragment.sql(), "`age` > ?");
/// assert_eq!(fragment.render_literal(false), "`age` > 20");
/// ```
pub fn comparison(
    column: impl Into<Column>,
    operator: &str,
    value: impl Into<Value>,
) -> Result<Fragment> {
    let operator = validate_operator(operator)?;
    Ok(compare(&column.into(), operator, value.into()))
}

/// Equality against a value, the operator-omitted form of [`comparison`].
#[inline]
pub fn equals(column: impl Into<Column>, value: impl Into<Value>) -> Fragment {
    compare(&column.into(), "=", value.into())
}

fn compare_columns(first: &Column, operator: &str, second: &Column) -> Fragment {
    let mut out = Prepared::new();
    first.write_to(&mut out);
    out.push(' ');
    out.push_str(operator);
    out.push(' ');
    second.write_to(&mut out);
    into_fragment(out)
}

/// Create a comparison between two columns: `` `created_at` = `updated_at` ``
pub fn column_comparison(
    first: impl Into<Column>,
    operator: &str,
    second: impl Into<Column>,
) -> Result<Fragment> {
    let operator = validate_operator(operator)?;
    Ok(compare_columns(&first.into(), operator, &second.into()))
}

/// Column equality, the operator-omitted form of [`column_comparison`].
#[inline]
pub fn column_equals(first: impl Into<Column>, second: impl Into<Column>) -> Fragment {
    compare_columns(&first.into(), "=", &second.into())
}

/// Create a pattern match: `` `name` LIKE ? `` or `` `name` NOT LIKE ? ``
pub fn like(column: impl Into<Column>, pattern: impl Into<Value>, negated: bool) -> Fragment {
    let operator = if negated { "NOT LIKE" } else { "LIKE" };
    compare(&column.into(), operator, pattern.into())
}

/// Create an `IS NULL` or `IS NOT NULL` test.
pub fn null_check(column: impl Into<Column>, not_null: bool) -> Fragment {
    let mut out = Prepared::new();
    column.into().write_to(&mut out);
    out.push_str(if not_null { " IS NOT NULL" } else { " IS NULL" });
    into_fragment(out)
}

/// Create an `IN` or `NOT IN` list with one placeholder per value.
///
/// An empty list renders `IN (NULL)`.
///
/// # Example
/// ```
/// # use quarry_core::expressions::membership;
/// let fragment = membership("name", ["John", "James"], false);
/// assert_eq!(fragment.sql(), "`name` IN (?, ?)");
/// assert_eq!(fragment.render_literal(false), "`name` IN ('John', 'James')");
/// ```
pub fn membership<I>(column: impl Into<Column>, values: I, not_in: bool) -> Fragment
where
    I: IntoIterator,
    I::Item: Into<Value>,
{
    let mut out = Prepared::new();
    column.into().write_to(&mut out);
    out.push_str(if not_in { " NOT IN (" } else { " IN (" });

    let mut values = values.into_iter().peekable();
    if values.peek().is_none() {
        out.push_str("NULL");
    }
    for (i, value) in values.enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_param(value.into());
    }
    out.push(')');
    into_fragment(out)
}

/// Create a `BETWEEN ? AND ?` range. Exactly two values are required.
pub fn range<I>(column: impl Into<Column>, values: I, negated: bool) -> Result<Fragment>
where
    I: IntoIterator,
    I::Item: Into<Value>,
{
    let values: Vec<Value> = values.into_iter().map(Into::into).collect();
    let [low, high]: [Value; 2] =
        values
            .try_into()
            .map_err(|values: Vec<Value>| QueryError::InvalidArrayLength {
                expected: 2,
                actual: values.len(),
            })?;

    let mut out = Prepared::new();
    column.into().write_to(&mut out);
    out.push_str(if negated { " NOT BETWEEN " } else { " BETWEEN " });
    out.push_param(low);
    out.push_str(" AND ");
    out.push_param(high);
    Ok(into_fragment(out))
}

/// Create a `BETWEEN` range bounded by two other columns.
pub fn column_range<I>(column: impl Into<Column>, columns: I, negated: bool) -> Result<Fragment>
where
    I: IntoIterator,
    I::Item: Into<Column>,
{
    let columns: Vec<Column> = columns.into_iter().map(Into::into).collect();
    validate_range_len(columns.len())?;

    let mut out = Prepared::new();
    column.into().write_to(&mut out);
    out.push_str(if negated { " NOT BETWEEN " } else { " BETWEEN " });
    columns[0].write_to(&mut out);
    out.push_str(" AND ");
    columns[1].write_to(&mut out);
    Ok(into_fragment(out))
}

/// Create an `EXISTS (...)` test over a complete statement.
///
/// The subquery is rendered once, here; later changes to it are not seen.
pub fn exists<S: Statement + ?Sized>(query: &S, negated: bool) -> Result<Fragment> {
    let inner = query.prepare()?;
    let mut out = Prepared::new();
    out.push_str("EXISTS (");
    out.append(inner);
    out.push(')');

    let fragment = into_fragment(out);
    Ok(if negated { fragment.negate() } else { fragment })
}

/// How a multi-column predicate combines its columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Match {
    /// At least one column matches
    Any,
    /// Every column matches
    All,
    /// No column matches
    None,
}

/// Compare several columns against one value, as a group.
///
/// `Any` joins the comparisons with OR, `All` with AND, and `None` is `Any`
/// wrapped in `NOT`. `LIKE` and `NOT LIKE` are accepted here besides the
/// comparison operators.
///
/// # Example
/// ```
/// # use quarry_core::expressions::{multi_column, Match};
/// let group = multi_column(["name", "email"], "LIKE", "Example%", Match::Any).unwrap();
/// assert_eq!(
///     group.render_literal(false),
///     "(`name` LIKE 'Example%' OR `email` LIKE 'Example%')"
/// );
/// ```
pub fn multi_column<I>(
    columns: I,
    operator: &str,
    value: impl Into<Value>,
    mode: Match,
) -> Result<Group>
where
    I: IntoIterator,
    I::Item: Into<Column>,
{
    let operator = validate_pattern_operator(operator)?;
    let value = value.into();
    let connector = match mode {
        Match::All => Connector::And,
        Match::Any | Match::None => Connector::Or,
    };

    let mut group = Group::new(Connector::And);
    for column in columns {
        group.push(compare(&column.into(), &operator, value.clone()).with_connector(connector));
    }

    Ok(match mode {
        Match::None => group.negate(),
        Match::Any | Match::All => group,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comparison_rejects_unknown_operator() {
        let err = comparison("age", "=>", 20).unwrap_err();
        assert!(matches!(err, QueryError::InvalidOperator(op) if op == "=>"));
    }

    #[test]
    fn test_column_comparison() {
        let fragment = column_comparison("users.id", "=", "posts.user_id").unwrap();
        assert_eq!(fragment.sql(), "`users`.`id` = `posts`.`user_id`");
        assert!(fragment.bindings().is_empty());
    }

    #[test]
    fn test_operator_omitted_forms() {
        assert_eq!(equals("id", 0).render_literal(false), "`id` = 0");
        assert_eq!(
            column_equals("created_at", "updated_at").sql(),
            "`created_at` = `updated_at`"
        );
    }

    #[test]
    fn test_null_checks() {
        assert_eq!(null_check("deleted_at", false).sql(), "`deleted_at` IS NULL");
        assert_eq!(null_check("deleted_at", true).sql(), "`deleted_at` IS NOT NULL");
    }

    #[test]
    fn test_empty_membership() {
        let fragment = membership("id", Vec::<i64>::new(), true);
        assert_eq!(fragment.sql(), "`id` NOT IN (NULL)");
        assert!(fragment.bindings().is_empty());
    }

    #[test]
    fn test_range() {
        let fragment = range("age", [18, 25], false).unwrap();
        assert_eq!(fragment.sql(), "`age` BETWEEN ? AND ?");
        assert_eq!(fragment.render_literal(false), "`age` BETWEEN 18 AND 25");

        let fragment = range("age", [18, 25], true).unwrap();
        assert_eq!(fragment.render_literal(false), "`age` NOT BETWEEN 18 AND 25");
    }

    #[test]
    fn test_range_arity() {
        for values in [vec![], vec![1], vec![1, 2, 3]] {
            let len = values.len();
            let err = range("age", values, false).unwrap_err();
            assert!(matches!(
                err,
                QueryError::InvalidArrayLength { expected: 2, actual } if actual == len
            ));
        }
        assert!(column_range("age", ["min_age"], false).is_err());
    }

    #[test]
    fn test_column_range() {
        let fragment = column_range("created_at", ["updated_at", "deleted_at"], true).unwrap();
        assert_eq!(
            fragment.sql(),
            "`created_at` NOT BETWEEN `updated_at` AND `deleted_at`"
        );
    }

    #[test]
    fn test_raw_column_bindings_come_first() {
        let column = Column::Raw(Fragment::raw_with("IF(state = ?, price, 0)", ["TX"]).unwrap());
        let fragment = comparison(column, ">", 100).unwrap();
        assert_eq!(fragment.sql(), "IF(state = ?, price, 0) > ?");
        assert_eq!(fragment.bindings(), &[Value::from("TX"), Value::from(100)]);
    }

    #[test]
    fn test_multi_column_modes() {
        let all = multi_column(["a", "b"], "=", 1, Match::All).unwrap();
        assert_eq!(all.render_literal(false), "(`a` = 1 AND `b` = 1)");

        let none = multi_column(["a", "b"], "like", "x%", Match::None).unwrap();
        assert_eq!(
            none.render_literal(true),
            "AND NOT (`a` LIKE 'x%' OR `b` LIKE 'x%')"
        );

        assert!(multi_column(["a"], "SOUNDS LIKE", "x", Match::Any).is_err());
    }

    #[test]
    fn test_like() {
        assert_eq!(like("name", "J%", false).render_literal(false), "`name` LIKE 'J%'");
        assert_eq!(like("name", "J%", true).sql(), "`name` NOT LIKE ?");
    }
}
