use std::fmt::{self, Display};

use serde::Serialize;

use varq_core::models::SortOrder;

use crate::clause::Clause;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortClause {
    pub field: String,
    pub order: SortOrder,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericRangeFacet {
    pub field: String,
    pub start: f64,
    pub end: f64,
    pub gap: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FacetSpec {
    pub fields: Vec<String>,
    pub queries: Vec<String>,
    pub prefix: Option<String>,
    pub ranges: Vec<NumericRangeFacet>,
}

impl FacetSpec {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
            && self.queries.is_empty()
            && self.prefix.is_none()
            && self.ranges.is_empty()
    }
}

///
/// Something the translator dropped or could not honour. The query is still valid
/// but may return more (or other) documents than the caller asked for.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TranslationWarning {
    StudyLookupFailed { studies: String, reason: String },
    GoLookupFailed { terms: String, reason: String },
    GoTermsWithoutGenes { terms: String },
    ExcludeNotSupported { fields: Vec<String> },
}

impl Display for TranslationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranslationWarning::StudyLookupFailed { studies, reason } => write!(
                f,
                "studies '{}' could not be resolved ({}), no study filter applied",
                studies, reason
            ),
            TranslationWarning::GoLookupFailed { terms, reason } => write!(
                f,
                "GO terms '{}' could not be expanded ({}), no GO filter applied",
                terms, reason
            ),
            TranslationWarning::GoTermsWithoutGenes { terms } => write!(
                f,
                "GO terms '{}' matched no genes, no GO filter applied",
                terms
            ),
            TranslationWarning::ExcludeNotSupported { fields } => write!(
                f,
                "field exclusion is not supported, ignoring exclude [{}]",
                fields.join(", ")
            ),
        }
    }
}

///
/// The translated query: a base query, filter queries that Solr ANDs together,
/// pagination, sort, field list and facets.
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolrQuery {
    pub query: String,
    pub filter_queries: Vec<Clause>,
    pub rows: Option<usize>,
    pub start: Option<usize>,
    pub sort: Option<SortClause>,
    pub fields: Vec<String>,
    pub facets: FacetSpec,
    pub warnings: Vec<TranslationWarning>,
}

impl SolrQuery {
    pub fn new(query: &str) -> Self {
        SolrQuery {
            query: query.to_string(),
            filter_queries: vec![],
            rows: None,
            start: None,
            sort: None,
            fields: vec![],
            facets: FacetSpec::default(),
            warnings: vec![],
        }
    }

    /// Filter queries rendered in Solr syntax.
    pub fn filter_query_strings(&self) -> Vec<String> {
        self.filter_queries.iter().map(Clause::to_string).collect()
    }

    ///
    /// Request parameters in the order Solr receives them. Parameters such as `fq`
    /// repeat, so this is a list and not a map.
    ///
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![("q".to_string(), self.query.clone())];

        for fq in &self.filter_queries {
            params.push(("fq".to_string(), fq.to_string()));
        }
        if let Some(rows) = self.rows {
            params.push(("rows".to_string(), rows.to_string()));
        }
        if let Some(start) = self.start {
            params.push(("start".to_string(), start.to_string()));
        }
        if let Some(sort) = &self.sort {
            params.push(("sort".to_string(), format!("{} {}", sort.field, sort.order)));
        }
        if !self.fields.is_empty() {
            params.push(("fl".to_string(), self.fields.join(",")));
        }

        if !self.facets.is_empty() {
            params.push(("facet".to_string(), "true".to_string()));
            for field in &self.facets.fields {
                params.push(("facet.field".to_string(), field.clone()));
            }
            for query in &self.facets.queries {
                params.push(("facet.query".to_string(), query.clone()));
            }
            if let Some(prefix) = &self.facets.prefix {
                params.push(("facet.prefix".to_string(), prefix.clone()));
            }
            for range in &self.facets.ranges {
                params.push(("facet.range".to_string(), range.field.clone()));
                params.push((
                    format!("f.{}.facet.range.start", range.field),
                    range.start.to_string(),
                ));
                params.push((
                    format!("f.{}.facet.range.end", range.field),
                    range.end.to_string(),
                ));
                params.push((
                    format!("f.{}.facet.range.gap", range.field),
                    range.gap.to_string(),
                ));
            }
        }

        params
    }
}
