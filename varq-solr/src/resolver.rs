use std::collections::{BTreeMap, BTreeSet};
use std::fs::read_to_string;
use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("Study not found: {0}")]
    StudyNotFound(String),
    #[error("Metadata store unavailable: {0}")]
    Unavailable(String),
}

///
/// Metadata lookups the translator needs. Implementations are backed by the
/// metadata store and must be safe to share between threads if the translator is.
///
pub trait MetadataResolver {
    ///
    /// Map study identifiers (numeric ids, full names or short names) to study ids.
    /// Identifiers that do not resolve are skipped; an error means none resolved.
    ///
    fn resolve_study_ids(&self, studies: &[String]) -> Result<BTreeSet<i32>, LookupError>;

    ///
    /// All registered studies, full name to id.
    ///
    fn studies(&self) -> Result<BTreeMap<String, i32>, LookupError>;

    ///
    /// Genes annotated with any of the given GO terms.
    ///
    fn genes_by_go_terms(&self, go_terms: &[String]) -> Result<BTreeSet<String>, LookupError>;
}

///
/// Table backed resolver, loaded from a TOML file:
///
/// ```toml
/// [studies]
/// "user@project:1kG_phase3" = 1
///
/// [go]
/// "GO:0002020" = ["BRCA2", "TP53"]
/// ```
///
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct InMemoryMetadata {
    pub studies: BTreeMap<String, i32>,
    pub go: BTreeMap<String, Vec<String>>,
}

/// `user@project:study` is known as `study` as well
fn short_name(name: &str) -> &str {
    name.rsplit(':').next().unwrap_or(name)
}

impl InMemoryMetadata {
    pub fn with_study(mut self, name: &str, id: i32) -> Self {
        self.studies.insert(name.to_string(), id);
        self
    }

    pub fn with_go_term(mut self, term: &str, genes: &[&str]) -> Self {
        self.go.insert(
            term.to_string(),
            genes.iter().map(|gene| gene.to_string()).collect(),
        );
        self
    }

    fn resolve_study_id(&self, study: &str) -> Option<i32> {
        if let Ok(id) = study.parse::<i32>() {
            return self.studies.values().find(|known| **known == id).copied();
        }
        self.studies.get(study).copied().or_else(|| {
            self.studies
                .iter()
                .find(|(name, _)| short_name(name) == study)
                .map(|(_, id)| *id)
        })
    }
}

impl MetadataResolver for InMemoryMetadata {
    fn resolve_study_ids(&self, studies: &[String]) -> Result<BTreeSet<i32>, LookupError> {
        let mut ids = BTreeSet::new();
        let mut missing = vec![];
        for study in studies {
            match self.resolve_study_id(study) {
                Some(id) => {
                    ids.insert(id);
                }
                None => missing.push(study.as_str()),
            }
        }

        if ids.is_empty() {
            return Err(LookupError::StudyNotFound(missing.join(",")));
        }
        for study in missing {
            warn!("Study not found: {}", study);
        }
        Ok(ids)
    }

    fn studies(&self) -> Result<BTreeMap<String, i32>, LookupError> {
        Ok(self.studies.clone())
    }

    fn genes_by_go_terms(&self, go_terms: &[String]) -> Result<BTreeSet<String>, LookupError> {
        Ok(go_terms
            .iter()
            .filter_map(|term| self.go.get(term))
            .flatten()
            .cloned()
            .collect())
    }
}

impl TryFrom<&Path> for InMemoryMetadata {
    type Error = ConfigError;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let toml_str = read_to_string(path)?;
        let metadata = toml::from_str(&toml_str)?;
        Ok(metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    use std::path::PathBuf;

    #[fixture]
    fn metadata() -> InMemoryMetadata {
        InMemoryMetadata::default()
            .with_study("user@project:1kG_phase3", 1)
            .with_study("user@project:GNOMAD", 2)
            .with_go_term("GO:0002020", &["BRCA2", "TP53"])
            .with_go_term("GO:0005515", &["TP53", "EGFR"])
    }

    #[rstest]
    fn test_resolve_by_id_and_name(metadata: InMemoryMetadata) {
        let ids = metadata
            .resolve_study_ids(&["1".to_string(), "GNOMAD".to_string()])
            .unwrap();
        assert_eq!(ids, BTreeSet::from([1, 2]));

        let ids = metadata
            .resolve_study_ids(&["user@project:GNOMAD".to_string()])
            .unwrap();
        assert_eq!(ids, BTreeSet::from([2]));
    }

    #[rstest]
    fn test_unknown_study(metadata: InMemoryMetadata) {
        let result = metadata.resolve_study_ids(&["ExAC".to_string(), "1".to_string()]);
        assert_eq!(result, Ok(BTreeSet::from([1])));

        let result = metadata.resolve_study_ids(&["ExAC".to_string(), "42".to_string()]);
        assert_eq!(result, Err(LookupError::StudyNotFound("ExAC,42".to_string())));
    }

    #[rstest]
    fn test_genes_by_go_terms(metadata: InMemoryMetadata) {
        let genes = metadata
            .genes_by_go_terms(&["GO:0002020".to_string(), "GO:0005515".to_string()])
            .unwrap();
        assert_eq!(
            genes.into_iter().collect::<Vec<_>>(),
            vec!["BRCA2", "EGFR", "TP53"]
        );

        let genes = metadata.genes_by_go_terms(&["GO:9999999".to_string()]).unwrap();
        assert!(genes.is_empty());
    }

    #[rstest]
    fn test_load_from_toml() {
        let path = PathBuf::from("../tests/data/metadata/metadata.toml");
        let metadata = InMemoryMetadata::try_from(path.as_path()).unwrap();
        assert_eq!(metadata.studies.len(), 2);
        assert_eq!(metadata.go.contains_key("GO:0002020"), true);
    }
}
