use std::fs::read_to_string;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::classify::IdClassification;

pub const DEFAULT_BASE_QUERY: &str = "*:*";

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TranslatorConfig {
    /// Main query, every restriction goes into filter queries.
    pub base_query: String,
    pub id_classification: IdClassification,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        TranslatorConfig {
            base_query: DEFAULT_BASE_QUERY.to_string(),
            id_classification: IdClassification::default(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

impl TryFrom<&Path> for TranslatorConfig {
    type Error = ConfigError;

    fn try_from(path: &Path) -> ConfigResult<Self> {
        let toml_str = read_to_string(path)?;
        let config = toml::from_str(&toml_str)?;
        Ok(config)
    }
}
