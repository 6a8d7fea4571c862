//! # varq-core
//!
//! Data model shared by the varq crates: the flat attribute query a REST handler
//! receives, the options that travel with it, genomic regions and the Sequence
//! Ontology consequence type table.
//!
//! ```rust
//! use varq_core::models::{QueryParam, VariantQuery};
//!
//! let query = VariantQuery::new()
//!     .with(QueryParam::Gene, "BRCA2")
//!     .with(QueryParam::ConsequenceType, "missense_variant");
//! assert!(query.is_set(QueryParam::Gene));
//! ```
pub mod consequence;
pub mod errors;
pub mod models;
pub mod values;

// re-exports
pub use consequence::parse_consequence_type;
pub use errors::*;
pub use values::{LogicalOperator, SplitValue, check_operator, split_any, split_value};
