//! Parsers for the comparison mini-grammars used by score and frequency filters:
//!
//! - score: `<name><op><value>`, e.g. `phylop>0.1`, `sift==tolerated`
//! - population: `<study>:<population><op><value>`, e.g. `1kG_phase3:CLM<<=0.01`
use std::fmt::{self, Display};
use std::str::FromStr;

use varq_core::{QueryError, Result};

const OPERATOR_CHARS: [char; 4] = ['=', '<', '>', '!'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOperator {
    /// `=` or `==`
    Eq,
    /// `!=`
    NotEq,
    Lt,
    Le,
    Gt,
    Ge,
    /// `<<`, lower than including absent values
    LtOrMissing,
    /// `<<=`
    LeOrMissing,
    /// `>>`, greater than including absent values
    GtOrMissing,
    /// `>>=`
    GeOrMissing,
}

impl ComparisonOperator {
    // longest symbols first so that `<<=` is never read as `<`
    const SYMBOLS: [(&'static str, ComparisonOperator); 11] = [
        ("<<=", ComparisonOperator::LeOrMissing),
        (">>=", ComparisonOperator::GeOrMissing),
        ("<<", ComparisonOperator::LtOrMissing),
        (">>", ComparisonOperator::GtOrMissing),
        ("<=", ComparisonOperator::Le),
        (">=", ComparisonOperator::Ge),
        ("!=", ComparisonOperator::NotEq),
        ("==", ComparisonOperator::Eq),
        ("<", ComparisonOperator::Lt),
        (">", ComparisonOperator::Gt),
        ("=", ComparisonOperator::Eq),
    ];

    ///
    /// Read an operator at the start of `s`, returning it with the number of bytes consumed
    ///
    pub fn parse_prefix(s: &str) -> Option<(ComparisonOperator, usize)> {
        Self::SYMBOLS
            .iter()
            .find(|(symbol, _)| s.starts_with(symbol))
            .map(|(symbol, op)| (*op, symbol.len()))
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            ComparisonOperator::Eq => "=",
            ComparisonOperator::NotEq => "!=",
            ComparisonOperator::Lt => "<",
            ComparisonOperator::Le => "<=",
            ComparisonOperator::Gt => ">",
            ComparisonOperator::Ge => ">=",
            ComparisonOperator::LtOrMissing => "<<",
            ComparisonOperator::LeOrMissing => "<<=",
            ComparisonOperator::GtOrMissing => ">>",
            ComparisonOperator::GeOrMissing => ">>=",
        }
    }
}

impl FromStr for ComparisonOperator {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self> {
        match Self::parse_prefix(s) {
            Some((op, len)) if len == s.len() => Ok(op),
            _ => Err(QueryError::MalformedExpression(s.to_string())),
        }
    }
}

impl Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

///
/// `<name><op><value>`
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreExpression {
    pub name: String,
    pub op: ComparisonOperator,
    pub value: String,
}

///
/// `<study>:<population><op><value>`
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopulationExpression {
    pub study: String,
    pub population: String,
    pub op: ComparisonOperator,
    pub value: String,
}

impl FromStr for ScoreExpression {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self> {
        let malformed = || QueryError::MalformedExpression(s.to_string());

        let op_start = s.find(OPERATOR_CHARS).ok_or_else(malformed)?;
        let name = &s[..op_start];
        if name.is_empty() {
            return Err(malformed());
        }

        let (op, op_len) = ComparisonOperator::parse_prefix(&s[op_start..]).ok_or_else(malformed)?;
        let value = &s[op_start + op_len..];
        if value.is_empty() || value.starts_with(OPERATOR_CHARS) {
            return Err(malformed());
        }

        Ok(ScoreExpression {
            name: name.to_string(),
            op,
            value: value.to_string(),
        })
    }
}

impl FromStr for PopulationExpression {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self> {
        let score = ScoreExpression::from_str(s)?;
        // the study may itself contain colons, the population is after the last one
        match score.name.rsplit_once(':') {
            Some((study, population)) if !study.is_empty() && !population.is_empty() => {
                Ok(PopulationExpression {
                    study: study.to_string(),
                    population: population.to_string(),
                    op: score.op,
                    value: score.value,
                })
            }
            _ => Err(QueryError::MalformedExpression(s.to_string())),
        }
    }
}

impl PopulationExpression {
    /// The same expression seen as a score on the population field.
    pub fn as_score(&self) -> ScoreExpression {
        ScoreExpression {
            name: self.population.clone(),
            op: self.op,
            value: self.value.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("phylop>0.1", "phylop", ComparisonOperator::Gt, "0.1")]
    #[case("gerp>=-1.5", "gerp", ComparisonOperator::Ge, "-1.5")]
    #[case("sift==tolerated", "sift", ComparisonOperator::Eq, "tolerated")]
    #[case("sift=tolerated", "sift", ComparisonOperator::Eq, "tolerated")]
    #[case("polyphen!=benign", "polyphen", ComparisonOperator::NotEq, "benign")]
    #[case("cadd_raw<0.3", "cadd_raw", ComparisonOperator::Lt, "0.3")]
    #[case("cadd_raw<=0.3", "cadd_raw", ComparisonOperator::Le, "0.3")]
    #[case("cadd_scaled<<5", "cadd_scaled", ComparisonOperator::LtOrMissing, "5")]
    #[case("cadd_scaled<<=5", "cadd_scaled", ComparisonOperator::LeOrMissing, "5")]
    #[case("gerp>>2", "gerp", ComparisonOperator::GtOrMissing, "2")]
    #[case("gerp>>=2", "gerp", ComparisonOperator::GeOrMissing, "2")]
    fn test_parse_score_expression(
        #[case] input: &str,
        #[case] name: &str,
        #[case] op: ComparisonOperator,
        #[case] value: &str,
    ) {
        let expr = ScoreExpression::from_str(input).unwrap();
        assert_eq!(expr.name, name);
        assert_eq!(expr.op, op);
        assert_eq!(expr.value, value);
    }

    #[rstest]
    #[case("phylop")]
    #[case(">0.1")]
    #[case("phylop>")]
    #[case("phylop!0.1")]
    #[case("phylop<>0.1")]
    #[case("phylop>>>0.1")]
    fn test_malformed_score_expression(#[case] input: &str) {
        assert_eq!(
            ScoreExpression::from_str(input),
            Err(QueryError::MalformedExpression(input.to_string()))
        );
    }

    #[rstest]
    fn test_parse_population_expression() {
        let expr = PopulationExpression::from_str("1kG_phase3:CLM<<=0.01").unwrap();
        assert_eq!(expr.study, "1kG_phase3");
        assert_eq!(expr.population, "CLM");
        assert_eq!(expr.op, ComparisonOperator::LeOrMissing);
        assert_eq!(expr.value, "0.01");

        let expr = PopulationExpression::from_str("user@project:study:ALL>0.4").unwrap();
        assert_eq!(expr.study, "user@project:study");
        assert_eq!(expr.population, "ALL");
    }

    #[rstest]
    #[case("ALL>0.4")]
    #[case(":ALL>0.4")]
    #[case("GNOMAD:>0.4")]
    fn test_malformed_population_expression(#[case] input: &str) {
        assert!(PopulationExpression::from_str(input).is_err());
    }

    #[rstest]
    fn test_operator_from_str() {
        assert_eq!(ComparisonOperator::from_str("<<="), Ok(ComparisonOperator::LeOrMissing));
        assert!(ComparisonOperator::from_str("<<<").is_err());
        assert_eq!(ComparisonOperator::GeOrMissing.to_string(), ">>=");
    }
}
