use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use rstest::*;

use varq_core::QueryError;
use varq_core::models::{QueryOptions, QueryParam, SortOrder, VariantQuery};
use varq_solr::{
    InMemoryMetadata, LookupError, MetadataResolver, SolrQuery, SolrQueryTranslator,
    TranslationWarning,
};

use std::collections::{BTreeMap, BTreeSet};

#[fixture]
fn path_to_data() -> PathBuf {
    PathBuf::from("../tests/data")
}

#[fixture]
fn metadata(path_to_data: PathBuf) -> InMemoryMetadata {
    InMemoryMetadata::try_from(path_to_data.join("metadata/metadata.toml").as_path()).unwrap()
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> T {
    serde_json::from_str(&read_to_string(path).unwrap()).unwrap()
}

/// A metadata store that is down.
struct UnavailableMetadata;

impl MetadataResolver for UnavailableMetadata {
    fn resolve_study_ids(&self, _studies: &[String]) -> Result<BTreeSet<i32>, LookupError> {
        Err(LookupError::Unavailable("connection refused".to_string()))
    }

    fn studies(&self) -> Result<BTreeMap<String, i32>, LookupError> {
        Err(LookupError::Unavailable("connection refused".to_string()))
    }

    fn genes_by_go_terms(&self, _go_terms: &[String]) -> Result<BTreeSet<String>, LookupError> {
        Err(LookupError::Unavailable("connection refused".to_string()))
    }
}

#[rstest]
fn test_translate_query_file(path_to_data: PathBuf, metadata: InMemoryMetadata) {
    let query: VariantQuery = read_json(&path_to_data.join("queries/brca2_missense.json"));
    let translator = SolrQueryTranslator::new(&metadata);
    let solr_query = translator
        .translate(&query, &QueryOptions::default())
        .unwrap();

    assert_eq!(solr_query.query, "*:*");
    assert_eq!(
        solr_query.filter_query_strings(),
        vec![
            "geneToSoAcc:BRCA2_1583 OR geneToSoAcc:BRCA2_1578",
            r#"studies:"1kG_phase3""#,
            r#"type:"SNV""#,
            "phylop:{0.1 TO *]",
            "((* -popFreq__GNOMAD_GENOMES__ALL:*) OR popFreq__GNOMAD_GENOMES__ALL:[0 TO 0.01})",
        ]
    );
    assert!(solr_query.warnings.is_empty());
}

#[rstest]
fn test_translate_options_file(path_to_data: PathBuf, metadata: InMemoryMetadata) {
    let options: QueryOptions = read_json(&path_to_data.join("queries/options.json"));
    let solr_query = SolrQueryTranslator::new(&metadata)
        .translate(&VariantQuery::new(), &options)
        .unwrap();

    let params = solr_query.to_params();
    let lookup = |name: &str| -> Vec<&str> {
        params
            .iter()
            .filter(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
            .collect()
    };

    assert_eq!(lookup("q"), vec!["*:*"]);
    assert_eq!(lookup("fq").len(), 0);
    assert_eq!(lookup("rows"), vec!["25"]);
    assert_eq!(lookup("start"), vec!["50"]);
    assert_eq!(lookup("sort"), vec!["caddScaled desc"]);
    assert_eq!(lookup("fl"), vec!["id,chromosome,start"]);
    assert_eq!(lookup("facet"), vec!["true"]);
    assert_eq!(lookup("facet.field"), vec!["type", "biotypes"]);
    assert_eq!(lookup("facet.range"), vec!["caddScaled"]);
    assert_eq!(lookup("f.caddScaled.facet.range.gap"), vec!["5"]);
}

#[rstest]
fn test_empty_query_only_paginates(metadata: InMemoryMetadata) {
    let options = QueryOptions::default().with_limit(10).with_skip(0);
    let solr_query = SolrQueryTranslator::new(&metadata)
        .translate(&VariantQuery::new(), &options)
        .unwrap();

    let mut expected = SolrQuery::new("*:*");
    expected.rows = Some(10);
    expected.start = Some(0);
    assert_eq!(solr_query, expected);
}

#[rstest]
fn test_translation_is_idempotent(path_to_data: PathBuf, metadata: InMemoryMetadata) {
    let query: VariantQuery = read_json(&path_to_data.join("queries/brca2_missense.json"));
    let options: QueryOptions = read_json(&path_to_data.join("queries/options.json"));
    let translator = SolrQueryTranslator::new(&metadata);

    let first = translator.translate(&query, &options).unwrap();
    let second = translator.translate(&query, &options).unwrap();
    assert_eq!(first.to_params(), second.to_params());
}

#[rstest]
#[case(QueryParam::Type, "SNV,INDEL;SV")]
#[case(QueryParam::Biotype, "protein_coding;miRNA,lincRNA")]
#[case(QueryParam::Conservation, "phylop>0.1,gerp>1;phastCons>0.5")]
#[case(QueryParam::FunctionalScore, "cadd_raw>1;cadd_scaled>2,cadd_raw<3")]
#[case(QueryParam::PopulationMaf, "1kG_phase3:ALL<0.1,GNOMAD:ALL<0.1;ExAC:ALL<0.1")]
#[case(QueryParam::Traits, "a,b;c")]
fn test_mixed_separators_fail(
    metadata: InMemoryMetadata,
    #[case] param: QueryParam,
    #[case] value: &str,
) {
    let query = VariantQuery::new().with(param, value);
    let result = SolrQueryTranslator::new(&metadata).translate(&query, &QueryOptions::default());
    assert_eq!(result, Err(QueryError::MixedSeparators(value.to_string())));
}

#[rstest]
#[case(QueryParam::ProteinSubstitution, "sift")]
#[case(QueryParam::Conservation, "phylop>0.1,gerp")]
#[case(QueryParam::StatsMaf, "ALL>0.1")]
fn test_malformed_expressions_fail(
    metadata: InMemoryMetadata,
    #[case] param: QueryParam,
    #[case] value: &str,
) {
    let query = VariantQuery::new().with(param, value);
    let result = SolrQueryTranslator::new(&metadata).translate(&query, &QueryOptions::default());
    assert!(matches!(result, Err(QueryError::MalformedExpression(_))));
}

#[rstest]
fn test_bad_region_fails(metadata: InMemoryMetadata) {
    let query = VariantQuery::new().with(QueryParam::Region, "1:abc-200");
    let result = SolrQueryTranslator::new(&metadata).translate(&query, &QueryOptions::default());
    assert!(matches!(result, Err(QueryError::RegionParseError(_))));
}

#[rstest]
fn test_unavailable_metadata_narrows_nothing_but_warns() {
    let query = VariantQuery::new()
        .with(QueryParam::Studies, "1kG_phase3")
        .with(QueryParam::Go, "GO:0002020")
        .with(QueryParam::Type, "SNV");
    let solr_query = SolrQueryTranslator::new(&UnavailableMetadata)
        .translate(&query, &QueryOptions::default())
        .unwrap();

    assert_eq!(solr_query.filter_query_strings(), vec![r#"type:"SNV""#]);
    assert_eq!(solr_query.warnings.len(), 2);
    assert!(matches!(
        solr_query.warnings[0],
        TranslationWarning::StudyLookupFailed { .. }
    ));
    assert!(matches!(
        solr_query.warnings[1],
        TranslationWarning::GoLookupFailed { .. }
    ));
}

#[rstest]
fn test_count_and_exclude(metadata: InMemoryMetadata) {
    let options = QueryOptions {
        count: true,
        limit: Some(100),
        exclude: vec!["annotation".to_string()],
        ..QueryOptions::default()
    }
    .with_sort("start", SortOrder::Ascending);

    let solr_query = SolrQueryTranslator::new(&metadata)
        .translate(&VariantQuery::new(), &options)
        .unwrap();
    assert_eq!(solr_query.rows, Some(0));
    assert_eq!(
        solr_query.warnings,
        vec![TranslationWarning::ExcludeNotSupported {
            fields: vec!["annotation".to_string()]
        }]
    );
    assert_eq!(
        solr_query.to_params().last().unwrap(),
        &("sort".to_string(), "start asc".to_string())
    );
}

#[rstest]
fn test_translator_is_shareable_across_threads(metadata: InMemoryMetadata) {
    let translator = SolrQueryTranslator::new(&metadata);
    let query = VariantQuery::new().with(QueryParam::Gene, "BRCA2");

    let results: Vec<Vec<String>> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                s.spawn(|| {
                    translator
                        .translate(&query, &QueryOptions::default())
                        .unwrap()
                        .filter_query_strings()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for fq in results {
        assert_eq!(fq, vec![r#"xrefs:"BRCA2""#]);
    }
}
