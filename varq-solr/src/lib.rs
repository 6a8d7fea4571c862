//! # varq-solr
//!
//! Compiles a flat variant attribute query into a Solr query.
//!
//! ## Purpose
//!
//! A REST handler receives loosely typed parameters such as `gene=BRCA2`,
//! `annot-ct=missense_variant` or `conservation=phylop>0.1`. This crate turns them
//! into a base query plus a list of filter queries that Solr ANDs together, and
//! maps pagination, sorting, projection and facets onto Solr request parameters.
//!
//! ## Main Components
//!
//! - **`SolrQueryTranslator`**: the entry point, borrows a `MetadataResolver`
//! - **`Clause`**: boolean clause tree, rendered to Solr syntax with `Display`
//! - **`ScoreExpression` / `PopulationExpression`**: comparison mini-grammars
//! - **`MetadataResolver`**: study and GO term lookups, `InMemoryMetadata` is a table backed one
//!
//! ## Example
//!
//! ```rust
//! use varq_core::models::{QueryOptions, QueryParam, VariantQuery};
//! use varq_solr::{InMemoryMetadata, SolrQueryTranslator};
//!
//! let metadata = InMemoryMetadata::default();
//! let translator = SolrQueryTranslator::new(&metadata);
//!
//! let query = VariantQuery::new()
//!     .with(QueryParam::Gene, "BRCA2")
//!     .with(QueryParam::ConsequenceType, "missense_variant");
//! let solr_query = translator.translate(&query, &QueryOptions::default()).unwrap();
//!
//! assert_eq!(solr_query.filter_query_strings(), vec!["geneToSoAcc:BRCA2_1583"]);
//! ```
//!
pub mod classify;
pub mod clause;
pub mod config;
pub mod expression;
pub mod query;
pub mod range;
pub mod resolver;
pub mod translator;

// re-export things
pub use classify::*;
pub use clause::*;
pub use config::*;
pub use expression::*;
pub use query::*;
pub use resolver::*;
pub use translator::*;

// contants
pub mod consts {
    pub const TRANSLATE_CMD: &str = "translate";
    pub const SO_TERMS_CMD: &str = "so-terms";
}
