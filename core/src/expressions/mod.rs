//! Fragment families.
//!
//! Each function here builds one [`Fragment`](crate::Fragment) (or, for the
//! multi-column families, one [`Group`](crate::Group)) for a single predicate
//! or clause shape. Validation happens here, before anything is pushed into a
//! container.

pub mod clauses;
pub mod conditions;

pub use clauses::*;
pub use conditions::*;

use crate::error::{QueryError, Result};
use compact_str::CompactString;

/// Operators accepted by comparison fragments.
pub const COMPARISON_OPERATORS: [&str; 10] =
    ["==", "=", "!=", "<>", ">", "<", ">=", "<=", "!<", "!>"];

/// Pattern operators additionally accepted by the multi-column families.
pub const PATTERN_OPERATORS: [&str; 2] = ["LIKE", "NOT LIKE"];

/// Checks `operator` against [`COMPARISON_OPERATORS`].
pub fn validate_operator(operator: &str) -> Result<&str> {
    if COMPARISON_OPERATORS.contains(&operator) {
        Ok(operator)
    } else {
        Err(QueryError::InvalidOperator(CompactString::from(operator)))
    }
}

/// Like [`validate_operator`] but also accepts `LIKE` and `NOT LIKE` in any case.
pub fn validate_pattern_operator(operator: &str) -> Result<CompactString> {
    if let Some(pattern) = PATTERN_OPERATORS
        .iter()
        .find(|pattern| pattern.eq_ignore_ascii_case(operator.trim()))
    {
        return Ok(CompactString::const_new(*pattern));
    }
    validate_operator(operator).map(CompactString::from)
}

/// Checks that a range input has exactly two items.
pub fn validate_range_len(actual: usize) -> Result<()> {
    if actual == 2 {
        Ok(())
    } else {
        Err(QueryError::InvalidArrayLength {
            expected: 2,
            actual,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_whitelist() {
        for op in COMPARISON_OPERATORS {
            assert!(validate_operator(op).is_ok(), "{op} should be accepted");
        }
        for op in ["LIKE", "===", "", " =", "; DROP"] {
            assert!(matches!(
                validate_operator(op),
                Err(QueryError::InvalidOperator(_))
            ));
        }
    }

    #[test]
    fn test_pattern_operators() {
        assert_eq!(validate_pattern_operator("like").unwrap(), "LIKE");
        assert_eq!(validate_pattern_operator("not like").unwrap(), "NOT LIKE");
        assert_eq!(validate_pattern_operator(">=").unwrap(), ">=");
        assert!(validate_pattern_operator("ILIKE").is_err());
    }

    #[test]
    fn test_range_len() {
        assert!(validate_range_len(2).is_ok());
        assert!(matches!(
            validate_range_len(3),
            Err(QueryError::InvalidArrayLength {
                expected: 2,
                actual: 3
            })
        ));
    }
}
