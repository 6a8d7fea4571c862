use std::str::FromStr;

use log::{debug, warn};

use varq_core::models::{QueryOptions, QueryParam, Region, VariantQuery, parse_regions};
use varq_core::{LogicalOperator, Result, parse_consequence_type, split_any, split_value};

use crate::classify::ClassifiedIds;
use crate::clause::{Bound, Clause};
use crate::config::TranslatorConfig;
use crate::expression::{PopulationExpression, ScoreExpression};
use crate::query::{FacetSpec, NumericRangeFacet, SolrQuery, SortClause, TranslationWarning};
use crate::range::{FieldFamily, build_range};
use crate::resolver::MetadataResolver;

/// Parameters whose identifiers end up in the xref/gene branch, in evaluation order.
const ID_PARAMS: [QueryParam; 5] = [
    QueryParam::Xref,
    QueryParam::Ids,
    QueryParam::Gene,
    QueryParam::Clinvar,
    QueryParam::Cosmic,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrequencySource {
    Population,
    Stats,
}

impl FrequencySource {
    fn family(&self, study: &str) -> FieldFamily {
        let study = study.to_string();
        match self {
            FrequencySource::Population => FieldFamily::PopulationFrequency { study },
            FrequencySource::Stats => FieldFamily::Stats { study },
        }
    }
}

/// Join sub-clauses, bare when there is only one and parenthesised otherwise.
fn combine(mut clauses: Vec<Clause>, op: LogicalOperator) -> Option<Clause> {
    match clauses.len() {
        0 => None,
        1 => clauses.pop(),
        _ => Some(match op {
            LogicalOperator::Or => Clause::Any(clauses).group(),
            LogicalOperator::And => Clause::All(clauses).group(),
        }),
    }
}

///
/// Exact match on a category field, e.g. variant type or biotype.
///
/// `SNV` gives `type:"SNV"`, `SNV,INDEL` gives `(type:"SNV" OR type:"INDEL")` and
/// `SNV;INDEL` the same joined with AND.
///
pub fn category_term(field: &str, value: &str) -> Result<Option<Clause>> {
    let split = split_value(value)?;
    let terms = split
        .values
        .iter()
        .map(|v| Clause::quoted(field, v))
        .collect();
    Ok(combine(terms, split.join_operator()))
}

///
/// Score filters such as `phylop>0.1,gerp<=2` or `sift==tolerated`.
///
pub fn score_clause(value: &str) -> Result<Option<Clause>> {
    let split = split_value(value)?;
    let clauses = split
        .values
        .iter()
        .map(|v| {
            let expr = ScoreExpression::from_str(v)?;
            Ok(build_range(&FieldFamily::Annotation, &expr))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(combine(clauses, split.join_operator()))
}

fn frequency_clause(source: FrequencySource, value: &str) -> Result<Option<Clause>> {
    let split = split_value(value)?;
    let clauses = split
        .values
        .iter()
        .map(|v| {
            let expr = PopulationExpression::from_str(v)?;
            Ok(build_range(&source.family(&expr.study), &expr.as_score()))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(combine(clauses, split.join_operator()))
}

///
/// Population frequency filters, `<study>:<population><op><value>`.
///
pub fn population_frequency_clause(value: &str) -> Result<Option<Clause>> {
    frequency_clause(FrequencySource::Population, value)
}

///
/// Cohort stats filters, `<study>:<cohort><op><value>`.
///
pub fn stats_clause(value: &str) -> Result<Option<Clause>> {
    frequency_clause(FrequencySource::Stats, value)
}

fn region_clause(region: &Region) -> Clause {
    let chromosome = Clause::raw("chromosome", &region.chr);
    let clause = if region.is_whole_chromosome() {
        chromosome
    } else if region.is_open_ended() {
        Clause::All(vec![
            chromosome,
            Clause::raw("start", &region.start.to_string()),
        ])
    } else {
        Clause::All(vec![
            chromosome,
            Clause::range(
                "start",
                Bound::inclusive(&region.start.to_string()),
                Bound::unbounded(),
            ),
            Clause::range(
                "end",
                Bound::unbounded(),
                Bound::inclusive(&region.end.to_string()),
            ),
        ])
    };
    clause.group()
}

///
/// `xrefs OR genes OR regions`, every id matched against the `xrefs` field.
///
fn xref_or_gene_or_region(xrefs: &[String], genes: &[String], regions: &[Region]) -> Option<Clause> {
    let clauses: Vec<Clause> = xrefs
        .iter()
        .chain(genes)
        .map(|id| Clause::quoted("xrefs", id))
        .chain(regions.iter().map(region_clause))
        .collect();

    if clauses.is_empty() {
        None
    } else {
        Some(Clause::any(clauses))
    }
}

fn consequence_type_or(cts: &[u32]) -> Clause {
    Clause::any(
        cts.iter()
            .map(|acc| Clause::raw("soAcc", &acc.to_string()))
            .collect(),
    )
}

///
/// `(xrefs OR regions) AND cts`, or only the cts when there are neither xrefs nor regions
///
fn xref_or_region_and_ct(xrefs: &[String], regions: &[Region], cts: &[u32]) -> Clause {
    match xref_or_gene_or_region(xrefs, &[], regions) {
        None => consequence_type_or(cts),
        Some(ids) => Clause::All(vec![ids.group(), consequence_type_or(cts).group()]),
    }
}

///
/// `gene AND ct` is indexed as the combined field `geneToSoAcc:<gene>_<acc>`, so every
/// gene/ct pair becomes one term of a disjunction.
///
fn gene_and_ct(genes: &[String], cts: &[u32]) -> Clause {
    Clause::any(
        genes
            .iter()
            .flat_map(|gene| {
                cts.iter()
                    .map(move |acc| Clause::raw("geneToSoAcc", &format!("{}_{}", gene, acc)))
            })
            .collect(),
    )
}

///
/// The id/region/consequence type block:
/// `[((xrefs OR regions) AND cts) OR (genes AND cts)]`, or a plain union without cts.
/// Regions without a chromosome are ignored.
///
pub fn location_clause(
    xrefs: &[String],
    genes: &[String],
    regions: &[Region],
    cts: &[u32],
) -> Option<Clause> {
    let regions: Vec<Region> = regions
        .iter()
        .filter(|region| !region.chr.is_empty())
        .cloned()
        .collect();
    let regions = regions.as_slice();

    if cts.is_empty() {
        return xref_or_gene_or_region(xrefs, genes, regions);
    }

    if genes.is_empty() {
        return Some(xref_or_region_and_ct(xrefs, regions, cts));
    }

    let genes_and_cts = gene_and_ct(genes, cts);
    if xrefs.is_empty() && regions.is_empty() {
        Some(genes_and_cts)
    } else {
        let or = xref_or_region_and_ct(xrefs, regions, cts);
        Some(Clause::Any(vec![or.group(), genes_and_cts.group()]))
    }
}

///
/// Translates variant queries into Solr queries.
///
/// The translator keeps no state between calls: the same query and options always
/// produce the same [`SolrQuery`]. Metadata lookups go through the borrowed resolver.
///
pub struct SolrQueryTranslator<'a, R: MetadataResolver + ?Sized> {
    resolver: &'a R,
    config: TranslatorConfig,
}

impl<'a, R: MetadataResolver + ?Sized> SolrQueryTranslator<'a, R> {
    pub fn new(resolver: &'a R) -> Self {
        Self::with_config(resolver, TranslatorConfig::default())
    }

    pub fn with_config(resolver: &'a R, config: TranslatorConfig) -> Self {
        SolrQueryTranslator { resolver, config }
    }

    ///
    /// Create a Solr query from a variant query and its options.
    ///
    /// # Arguments
    /// - query: the attribute query
    /// - options: pagination, sort, projection and facets
    ///
    /// # Returns
    /// An error for malformed values; lookups that fail only add a warning
    ///
    pub fn translate(&self, query: &VariantQuery, options: &QueryOptions) -> Result<SolrQuery> {
        let mut solr_query = SolrQuery::new(&self.config.base_query);
        self.apply_options(options, &mut solr_query);

        let mut filters: Vec<Clause> = vec![];

        // OR conditions: xrefs, genes, regions and consequence types
        let mut ids = ClassifiedIds::default();
        for param in ID_PARAMS {
            if let Some(value) = query.get(param) {
                ids.classify(value, self.config.id_classification);
            }
        }

        let regions = match query.get(QueryParam::Region) {
            Some(value) => parse_regions(value)?,
            None => vec![],
        };

        let cts = match query.get(QueryParam::ConsequenceType) {
            Some(value) => split_any(value)
                .into_iter()
                .map(parse_consequence_type)
                .collect::<Result<Vec<_>>>()?,
            None => vec![],
        };

        filters.extend(location_clause(&ids.xrefs, &ids.genes, &regions, &cts));

        // AND conditions
        if let Some(value) = query.get(QueryParam::Studies) {
            filters.extend(self.study_clause(value, &mut solr_query.warnings)?);
        }

        if let Some(value) = query.get(QueryParam::Type) {
            filters.extend(category_term("type", value)?);
        }

        if let Some(value) = query.get(QueryParam::Biotype) {
            filters.extend(category_term("biotypes", value)?);
        }

        for param in [
            QueryParam::ProteinSubstitution,
            QueryParam::Conservation,
            QueryParam::FunctionalScore,
        ] {
            if let Some(value) = query.get(param) {
                filters.extend(score_clause(value)?);
            }
        }

        // in the index: "popFreq__1kG_phase3__CLM": 0.0053
        if let Some(value) = query.get(QueryParam::PopulationMaf) {
            filters.extend(frequency_clause(FrequencySource::Population, value)?);
        }

        // in the index: "stats__1kg_phase3__ALL": 0.02
        if let Some(value) = query.get(QueryParam::StatsMaf) {
            filters.extend(frequency_clause(FrequencySource::Stats, value)?);
        }

        if let Some(value) = query.get(QueryParam::Go) {
            filters.extend(self.go_clause(value, &mut solr_query.warnings)?);
        }

        for param in [QueryParam::Hpo, QueryParam::Clinvar, QueryParam::Traits] {
            if let Some(value) = query.get(param) {
                filters.extend(category_term("traits", value)?);
            }
        }

        debug!("query = {}", query);
        for filter in &filters {
            debug!("Solr fq: {}", filter);
        }

        solr_query.filter_queries = filters;
        Ok(solr_query)
    }

    fn apply_options(&self, options: &QueryOptions, solr_query: &mut SolrQuery) {
        if !options.include.is_empty() {
            solr_query.fields = options.include.clone();
        }

        if !options.exclude.is_empty() {
            let warning = TranslationWarning::ExcludeNotSupported {
                fields: options.exclude.clone(),
            };
            warn!("{}", warning);
            solr_query.warnings.push(warning);
        }

        solr_query.rows = if options.count { Some(0) } else { options.limit };
        solr_query.start = options.skip;

        if let Some(field) = options.sort.as_deref().filter(|field| !field.is_empty()) {
            solr_query.sort = Some(SortClause {
                field: field.to_string(),
                order: options.order,
            });
        }

        let facet = &options.facet;
        let mut facets = FacetSpec::default();
        facets.fields.extend(facet.field.iter().cloned());
        facets
            .fields
            .extend(facet.fields.iter().filter(|f| !f.is_empty()).cloned());
        facets.queries.extend(facet.query.iter().cloned());
        facets.prefix = facet.prefix.clone();
        facets.ranges = facet
            .ranges
            .iter()
            .map(|(field, range)| NumericRangeFacet {
                field: field.clone(),
                start: range.start,
                end: range.end,
                gap: range.gap,
            })
            .collect();
        solr_query.facets = facets;
    }

    ///
    /// Studies are stored in the index by their short name. The filter only makes
    /// sense when there is more than one study registered.
    ///
    fn study_clause(
        &self,
        value: &str,
        warnings: &mut Vec<TranslationWarning>,
    ) -> Result<Option<Clause>> {
        let split = split_value(value)?;
        let studies: Vec<String> = split.values.iter().map(|v| v.to_string()).collect();

        let lookup = self
            .resolver
            .resolve_study_ids(&studies)
            .and_then(|ids| Ok((ids, self.resolver.studies()?)));
        let (ids, registered) = match lookup {
            Ok(found) => found,
            Err(e) => {
                let warning = TranslationWarning::StudyLookupFailed {
                    studies: value.to_string(),
                    reason: e.to_string(),
                };
                warn!("{}", warning);
                warnings.push(warning);
                return Ok(None);
            }
        };

        if registered.len() <= 1 {
            debug!("Only {} study registered, skipping study filter", registered.len());
            return Ok(None);
        }

        let names: Vec<&str> = registered
            .iter()
            .filter(|(_, id)| ids.contains(*id))
            .map(|(name, _)| name.rsplit(':').next().unwrap_or(name.as_str()))
            .collect();

        if names.is_empty() {
            let warning = TranslationWarning::StudyLookupFailed {
                studies: value.to_string(),
                reason: "no registered study matches".to_string(),
            };
            warn!("{}", warning);
            warnings.push(warning);
            return Ok(None);
        }

        let separator = split.join_operator().separator().to_string();
        category_term("studies", &names.join(&separator))
    }

    ///
    /// GO terms are matched through the genes annotated with them.
    ///
    fn go_clause(
        &self,
        value: &str,
        warnings: &mut Vec<TranslationWarning>,
    ) -> Result<Option<Clause>> {
        let terms: Vec<String> = value
            .split(',')
            .filter(|term| !term.is_empty())
            .map(|term| term.to_string())
            .collect();

        let warning = match self.resolver.genes_by_go_terms(&terms) {
            Ok(genes) if !genes.is_empty() => {
                let genes: Vec<String> = genes.into_iter().collect();
                return category_term("xrefs", &genes.join(","));
            }
            Ok(_) => TranslationWarning::GoTermsWithoutGenes {
                terms: value.to_string(),
            },
            Err(e) => TranslationWarning::GoLookupFailed {
                terms: value.to_string(),
                reason: e.to_string(),
            },
        };
        warn!("{}", warning);
        warnings.push(warning);
        Ok(None)
    }
}
