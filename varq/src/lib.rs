//! # varq
//!
//! Umbrella crate for the varq workspace. Each piece is behind a feature:
//!
//! - `core`: query, options, region and consequence type models ([`core`])
//! - `solr`: the Solr filter query translator ([`solr`])
//!
#[cfg(feature = "core")]
pub use varq_core as core;

#[cfg(feature = "solr")]
pub use varq_solr as solr;
