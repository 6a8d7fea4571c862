use std::fmt::{self, Display};

use crate::errors::{QueryError, Result};

pub const OR_SEPARATOR: char = ',';
pub const AND_SEPARATOR: char = ';';

///
/// Logical operator between the sub-values of one query value. `,` means OR, `;` means AND.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOperator {
    Or,
    And,
}

impl LogicalOperator {
    pub fn separator(&self) -> char {
        match self {
            LogicalOperator::Or => OR_SEPARATOR,
            LogicalOperator::And => AND_SEPARATOR,
        }
    }
}

impl Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicalOperator::Or => write!(f, "OR"),
            LogicalOperator::And => write!(f, "AND"),
        }
    }
}

///
/// Detect which operator a value uses. `None` for a single value.
///
/// # Arguments
/// - value: raw query value
///
/// # Returns
/// An error if the value mixes both separators
///
pub fn check_operator(value: &str) -> Result<Option<LogicalOperator>> {
    let or = value.contains(OR_SEPARATOR);
    let and = value.contains(AND_SEPARATOR);
    match (or, and) {
        (true, true) => Err(QueryError::MixedSeparators(value.to_string())),
        (true, false) => Ok(Some(LogicalOperator::Or)),
        (false, true) => Ok(Some(LogicalOperator::And)),
        (false, false) => Ok(None),
    }
}

///
/// A query value split into its sub-values
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitValue<'a> {
    pub operator: Option<LogicalOperator>,
    pub values: Vec<&'a str>,
}

impl<'a> SplitValue<'a> {
    /// Operator to join the sub-values with. A lone value joins with nothing, OR is the default.
    pub fn join_operator(&self) -> LogicalOperator {
        self.operator.unwrap_or(LogicalOperator::Or)
    }
}

///
/// Split a value on its separator, rejecting values that mix `,` and `;`.
/// Empty sub-values are dropped.
///
pub fn split_value(value: &str) -> Result<SplitValue<'_>> {
    let operator = check_operator(value)?;
    let values = match operator {
        Some(op) => value
            .split(op.separator())
            .filter(|v| !v.is_empty())
            .collect(),
        None if value.is_empty() => vec![],
        None => vec![value],
    };
    Ok(SplitValue { operator, values })
}

///
/// Split on either separator without checking that they are not mixed.
/// Used for identifier lists, where both separators just mean "one of these".
///
pub fn split_any(value: &str) -> Vec<&str> {
    value
        .split([OR_SEPARATOR, AND_SEPARATOR])
        .filter(|v| !v.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("a", None)]
    #[case("a,b", Some(LogicalOperator::Or))]
    #[case("a;b", Some(LogicalOperator::And))]
    fn test_check_operator(#[case] value: &str, #[case] expected: Option<LogicalOperator>) {
        assert_eq!(check_operator(value).unwrap(), expected);
    }

    #[rstest]
    #[case("a,b;c")]
    #[case(";,")]
    fn test_mixed_separators_are_rejected(#[case] value: &str) {
        assert_eq!(
            check_operator(value),
            Err(QueryError::MixedSeparators(value.to_string()))
        );
        assert!(split_value(value).is_err());
    }

    #[rstest]
    fn test_split_value() {
        let split = split_value("SNV;INDEL").unwrap();
        assert_eq!(split.values, vec!["SNV", "INDEL"]);
        assert_eq!(split.join_operator(), LogicalOperator::And);

        let split = split_value("SNV,").unwrap();
        assert_eq!(split.values, vec!["SNV"]);
        assert_eq!(split.join_operator(), LogicalOperator::Or);
    }

    #[rstest]
    fn test_split_any_accepts_both_separators() {
        assert_eq!(split_any("BRCA2,rs123;TP53"), vec!["BRCA2", "rs123", "TP53"]);
    }
}
