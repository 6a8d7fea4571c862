use std::fs::read_to_string;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::{info, warn};
use serde::de::DeserializeOwned;

use varq_core::models::{QueryOptions, VariantQuery};
use varq_solr::{InMemoryMetadata, SolrQuery, SolrQueryTranslator, TranslatorConfig};

use super::cli::DEFAULT_FORMAT;

///
/// Read a json, yaml or toml file, picking the format from the extension
///
pub fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents =
        read_to_string(path).with_context(|| format!("Failed to open file: {:?}", path))?;

    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase());

    let document = match ext.as_deref() {
        Some("json") => serde_json::from_str(&contents)?,
        Some("yaml") | Some("yml") => serde_yaml::from_str(&contents)?,
        Some("toml") => toml::from_str(&contents)?,
        _ => anyhow::bail!(
            "Unsupported file type: {:?}. Use a .json, .yaml or .toml file",
            path
        ),
    };

    Ok(document)
}

fn write_output(solr_query: &SolrQuery, format: &str) -> Result<()> {
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());

    match format {
        "json" => {
            serde_json::to_writer_pretty(&mut writer, solr_query)?;
            writeln!(writer)?;
        }
        _ => {
            for (name, value) in solr_query.to_params() {
                writeln!(writer, "{}={}", name, value)?;
            }
        }
    }

    writer.flush()?;

    Ok(())
}

pub fn run_translate(matches: &ArgMatches) -> Result<()> {
    // get arguments from CLI
    let query_file = matches
        .get_one::<String>("query")
        .expect("A path to a query file is required.");

    let default_format = DEFAULT_FORMAT.to_string();
    let format = matches
        .get_one::<String>("format")
        .unwrap_or(&default_format);

    // coerce arguments to types
    let query: VariantQuery = read_document(Path::new(query_file))?;

    let options: QueryOptions = match matches.get_one::<String>("options") {
        Some(path) => read_document(Path::new(path))?,
        None => QueryOptions::default(),
    };

    let metadata = match matches.get_one::<String>("metadata") {
        Some(path) => InMemoryMetadata::try_from(Path::new(path))
            .with_context(|| format!("Failed to load metadata from {}", path))?,
        None => InMemoryMetadata::default(),
    };

    let config = match matches.get_one::<String>("config") {
        Some(path) => TranslatorConfig::try_from(Path::new(path))
            .with_context(|| format!("Failed to load translator config from {}", path))?,
        None => TranslatorConfig::default(),
    };

    for key in query.unknown_keys() {
        info!("Ignoring unknown query parameter: {}", key);
    }

    let translator = SolrQueryTranslator::with_config(&metadata, config);
    let solr_query = translator
        .translate(&query, &options)
        .with_context(|| format!("Invalid query in {}", query_file))?;

    for warning in &solr_query.warnings {
        warn!("{}", warning);
    }

    write_output(&solr_query, format)?;

    Ok(())
}
