//! Boolean clause tree for Solr filter queries.
//!
//! Composition code builds [`Clause`] values and never concatenates strings; the
//! `Display` impl is the only place that knows the Solr standard query syntax.
//! Grouping is explicit: `Any`/`All` join their children without parentheses and
//! a [`Clause::Group`] has to be used wherever the expression needs them.
use std::fmt::{self, Display};

use serde::{Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TermValue {
    /// `field:"value"`
    Quoted(String),
    /// `field:value`, negative numbers escaped as `\-1`
    Number(String),
    /// `field:value`, written as is
    Raw(String),
}

///
/// One side of a range, `*` when unbounded
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bound {
    pub value: String,
    pub inclusive: bool,
}

impl Bound {
    pub fn inclusive(value: &str) -> Self {
        Bound {
            value: value.to_string(),
            inclusive: true,
        }
    }

    pub fn exclusive(value: &str) -> Self {
        Bound {
            value: value.to_string(),
            inclusive: false,
        }
    }

    pub fn unbounded() -> Self {
        Bound::inclusive("*")
    }

    pub fn new(value: &str, inclusive: bool) -> Self {
        Bound {
            value: value.to_string(),
            inclusive,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    Term { field: String, value: TermValue },
    Range { field: String, lower: Bound, upper: Bound },
    /// Documents without any value for the field.
    Missing { field: String },
    Not(Box<Clause>),
    Any(Vec<Clause>),
    All(Vec<Clause>),
    Group(Box<Clause>),
}

impl Clause {
    pub fn quoted(field: &str, value: &str) -> Self {
        Clause::Term {
            field: field.to_string(),
            value: TermValue::Quoted(value.to_string()),
        }
    }

    pub fn number(field: &str, value: &str) -> Self {
        Clause::Term {
            field: field.to_string(),
            value: TermValue::Number(value.to_string()),
        }
    }

    pub fn raw(field: &str, value: &str) -> Self {
        Clause::Term {
            field: field.to_string(),
            value: TermValue::Raw(value.to_string()),
        }
    }

    pub fn range(field: &str, lower: Bound, upper: Bound) -> Self {
        Clause::Range {
            field: field.to_string(),
            lower,
            upper,
        }
    }

    pub fn missing(field: &str) -> Self {
        Clause::Missing {
            field: field.to_string(),
        }
    }

    pub fn negate(self) -> Self {
        Clause::Not(Box::new(self))
    }

    pub fn group(self) -> Self {
        Clause::Group(Box::new(self))
    }

    /// OR of a list of clauses, flattened to the clause itself when there is only one.
    pub fn any(mut clauses: Vec<Clause>) -> Self {
        if clauses.len() == 1 {
            clauses.remove(0)
        } else {
            Clause::Any(clauses)
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, clauses: &[Clause], op: &str) -> fmt::Result {
    for (i, clause) in clauses.iter().enumerate() {
        if i > 0 {
            write!(f, " {} ", op)?;
        }
        write!(f, "{}", clause)?;
    }
    Ok(())
}

impl Display for TermValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TermValue::Quoted(value) => write!(f, "\"{}\"", value),
            TermValue::Number(value) if value.starts_with('-') => write!(f, "\\{}", value),
            TermValue::Number(value) | TermValue::Raw(value) => write!(f, "{}", value),
        }
    }
}

impl Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Clause::Term { field, value } => write!(f, "{}:{}", field, value),
            Clause::Range {
                field,
                lower,
                upper,
            } => write!(
                f,
                "{}:{}{} TO {}{}",
                field,
                if lower.inclusive { '[' } else { '{' },
                lower.value,
                upper.value,
                if upper.inclusive { ']' } else { '}' },
            ),
            Clause::Missing { field } => write!(f, "(* -{}:*)", field),
            Clause::Not(inner) => write!(f, "-{}", inner),
            Clause::Any(clauses) => write_joined(f, clauses, "OR"),
            Clause::All(clauses) => write_joined(f, clauses, "AND"),
            Clause::Group(inner) => write!(f, "({})", inner),
        }
    }
}

impl Serialize for Clause {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(Clause::quoted("type", "SNV"), r#"type:"SNV""#)]
    #[case(Clause::number("gerp", "-1.5"), r"gerp:\-1.5")]
    #[case(Clause::number("gerp", "1.5"), "gerp:1.5")]
    #[case(Clause::raw("soAcc", "1583"), "soAcc:1583")]
    #[case(Clause::missing("popFreq__GNOMAD__ALL"), "(* -popFreq__GNOMAD__ALL:*)")]
    #[case(Clause::raw("sift", "-1").negate(), "-sift:-1")]
    fn test_render_leaves(#[case] clause: Clause, #[case] expected: &str) {
        assert_eq!(clause.to_string(), expected);
    }

    #[rstest]
    fn test_render_ranges() {
        let clause = Clause::range("phylop", Bound::exclusive("0.1"), Bound::unbounded());
        assert_eq!(clause.to_string(), "phylop:{0.1 TO *]");

        let clause = Clause::range("end", Bound::unbounded(), Bound::inclusive("200"));
        assert_eq!(clause.to_string(), "end:[* TO 200]");
    }

    #[rstest]
    fn test_grouping_is_explicit() {
        let or = Clause::any(vec![Clause::quoted("a", "1"), Clause::quoted("a", "2")]);
        assert_eq!(or.to_string(), r#"a:"1" OR a:"2""#);
        assert_eq!(or.group().to_string(), r#"(a:"1" OR a:"2")"#);
    }

    #[rstest]
    fn test_single_child_is_flattened() {
        let single = Clause::any(vec![Clause::quoted("a", "1")]);
        assert_eq!(single, Clause::quoted("a", "1"));
    }
}
