use crate::clause::{Bound, Clause};
use crate::expression::{ComparisonOperator, ScoreExpression};

/// Value stored in the index for scores that were not computed for a variant.
pub const MISSING_VALUE: f64 = -100.0;

pub const POPULATION_FREQUENCY_PREFIX: &str = "popFreq";
pub const STATS_PREFIX: &str = "stats";

fn missing_value() -> String {
    format!("{:.1}", MISSING_VALUE)
}

///
/// Where a score lives in the index. Frequency fields are stored per study and
/// population as `<prefix>__<study>__<population>` and are simply absent when unknown,
/// annotation scores hold [`MISSING_VALUE`] instead.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldFamily {
    Annotation,
    PopulationFrequency { study: String },
    Stats { study: String },
}

impl FieldFamily {
    pub fn prefix(&self) -> String {
        match self {
            FieldFamily::Annotation => String::new(),
            FieldFamily::PopulationFrequency { study } => {
                format!("{}__{}__", POPULATION_FREQUENCY_PREFIX, study)
            }
            FieldFamily::Stats { study } => format!("{}__{}__", STATS_PREFIX, study),
        }
    }

    pub fn is_frequency(&self) -> bool {
        !matches!(self, FieldFamily::Annotation)
    }
}

///
/// Map a user facing score name onto the index field name
///
pub fn solr_field_name(name: &str) -> &str {
    match name {
        "cadd_scaled" | "caddScaled" => "caddScaled",
        "cadd_raw" | "caddRaw" => "caddRaw",
        _ => name,
    }
}

/// Finite numbers only, `nan` and `inf` are treated as text
fn is_number(value: &str) -> bool {
    value.parse::<f64>().is_ok_and(f64::is_finite)
}

/// sift and polyphen carry a numeric score and a textual prediction in two fields
fn description_field(name: &str) -> Option<&'static str> {
    match name.to_lowercase().as_str() {
        "sift" => Some("sift"),
        "polyphen" => Some("polyphen"),
        _ => None,
    }
}

///
/// Build the clause for one comparison.
///
/// In Solr, range queries can be inclusive or exclusive of the upper and lower bounds:
/// inclusive bounds use square brackets, exclusive bounds curly brackets.
///
/// # Arguments
/// - family: the field family, which decides the field prefix and how absent values look
/// - expr: the parsed comparison
///
pub fn build_range(family: &FieldFamily, expr: &ScoreExpression) -> Clause {
    let prefix = family.prefix();
    let field = format!("{}{}", prefix, solr_field_name(&expr.name));
    let value = expr.value.as_str();

    match expr.op {
        ComparisonOperator::Eq => {
            if is_number(value) {
                Clause::number(&field, value)
            } else {
                match description_field(&expr.name) {
                    Some(base) => Clause::quoted(&format!("{}{}Desc", prefix, base), value),
                    None => Clause::quoted(&field, value),
                }
            }
        }
        ComparisonOperator::NotEq => match description_field(&expr.name) {
            Some(base) if is_number(value) => {
                Clause::number(&format!("{}{}", prefix, base), value).negate()
            }
            Some(base) => Clause::quoted(&format!("{}{}Desc", prefix, base), value).negate(),
            None => Clause::raw(&field, value).negate(),
        },
        ComparisonOperator::Lt => Clause::range(
            &field,
            Bound::exclusive(&missing_value()),
            Bound::exclusive(value),
        ),
        ComparisonOperator::Le => Clause::range(
            &field,
            Bound::exclusive(&missing_value()),
            Bound::inclusive(value),
        ),
        ComparisonOperator::Gt => Clause::range(&field, Bound::exclusive(value), Bound::unbounded()),
        ComparisonOperator::Ge => Clause::range(&field, Bound::inclusive(value), Bound::unbounded()),
        ComparisonOperator::LtOrMissing | ComparisonOperator::LeOrMissing => {
            let upper = Bound::new(value, expr.op == ComparisonOperator::LeOrMissing);
            if family.is_frequency() {
                Clause::Any(vec![
                    Clause::missing(&field),
                    Clause::range(&field, Bound::inclusive("0"), upper),
                ])
                .group()
            } else {
                Clause::range(&field, Bound::inclusive(&missing_value()), upper)
            }
        }
        ComparisonOperator::GtOrMissing | ComparisonOperator::GeOrMissing => {
            let lower = Bound::new(value, expr.op == ComparisonOperator::GeOrMissing);
            let range = Clause::range(&field, lower, Bound::unbounded());
            let absent = if family.is_frequency() {
                Clause::missing(&field)
            } else {
                Clause::number(&field, &missing_value())
            };
            Clause::Any(vec![range, absent]).group()
        }
    }
}
