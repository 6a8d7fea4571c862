use std::collections::BTreeMap;
use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

///
/// Well-known keys of a variant query.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryParam {
    Ids,
    Region,
    Gene,
    Type,
    Studies,
    ConsequenceType,
    Xref,
    Biotype,
    ProteinSubstitution,
    Conservation,
    FunctionalScore,
    PopulationMaf,
    StatsMaf,
    Go,
    Hpo,
    Clinvar,
    Cosmic,
    Traits,
}

impl QueryParam {
    pub const ALL: [QueryParam; 18] = [
        QueryParam::Ids,
        QueryParam::Region,
        QueryParam::Gene,
        QueryParam::Type,
        QueryParam::Studies,
        QueryParam::ConsequenceType,
        QueryParam::Xref,
        QueryParam::Biotype,
        QueryParam::ProteinSubstitution,
        QueryParam::Conservation,
        QueryParam::FunctionalScore,
        QueryParam::PopulationMaf,
        QueryParam::StatsMaf,
        QueryParam::Go,
        QueryParam::Hpo,
        QueryParam::Clinvar,
        QueryParam::Cosmic,
        QueryParam::Traits,
    ];

    /// Key of the parameter as received from the REST layer.
    pub fn key(&self) -> &'static str {
        match self {
            QueryParam::Ids => "ids",
            QueryParam::Region => "region",
            QueryParam::Gene => "gene",
            QueryParam::Type => "type",
            QueryParam::Studies => "studies",
            QueryParam::ConsequenceType => "annot-ct",
            QueryParam::Xref => "annot-xref",
            QueryParam::Biotype => "annot-biotype",
            QueryParam::ProteinSubstitution => "protein_substitution",
            QueryParam::Conservation => "conservation",
            QueryParam::FunctionalScore => "annot-functional-score",
            QueryParam::PopulationMaf => "annot-population-maf",
            QueryParam::StatsMaf => "maf",
            QueryParam::Go => "annot-go",
            QueryParam::Hpo => "annot-hpo",
            QueryParam::Clinvar => "annot-clinvar",
            QueryParam::Cosmic => "annot-cosmic",
            QueryParam::Traits => "traits",
        }
    }
}

impl FromStr for QueryParam {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QueryParam::ALL
            .iter()
            .find(|param| param.key() == s)
            .copied()
            .ok_or_else(|| format!("Unknown query parameter: {}", s))
    }
}

impl Display for QueryParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

///
/// A flat attribute query: parameter key to string-encoded filter expression.
/// Keys outside of [`QueryParam`] are kept but never translated.
///
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariantQuery {
    params: BTreeMap<String, String>,
}

impl VariantQuery {
    pub fn new() -> Self {
        Self::default()
    }

    ///
    /// Builder style insert, handy for tests and handlers
    ///
    pub fn with(mut self, param: QueryParam, value: &str) -> Self {
        self.insert(param, value);
        self
    }

    pub fn insert(&mut self, param: QueryParam, value: &str) {
        self.params.insert(param.key().to_string(), value.to_string());
    }

    ///
    /// Value of the parameter, `None` when absent or empty
    ///
    pub fn get(&self, param: QueryParam) -> Option<&str> {
        self.params
            .get(param.key())
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    pub fn is_set(&self, param: QueryParam) -> bool {
        self.get(param).is_some()
    }

    /// Keys present in the query that are not recognised parameters.
    pub fn unknown_keys(&self) -> Vec<&str> {
        self.params
            .keys()
            .filter(|key| QueryParam::from_str(key).is_err())
            .map(String::as_str)
            .collect()
    }
}

impl Display for VariantQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs: Vec<String> = self
            .params
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect();
        write!(f, "{{{}}}", pairs.join(", "))
    }
}

impl<K: AsRef<str>, V: AsRef<str>> FromIterator<(K, V)> for VariantQuery {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let params = iter
            .into_iter()
            .map(|(k, v)| (k.as_ref().to_string(), v.as_ref().to_string()))
            .collect();
        VariantQuery { params }
    }
}
