use serde::{Deserialize, Serialize};

use varq_core::split_any;

/// Accession prefixes followed only by digits: dbSNP, COSMIC and ClinVar ids.
const ACCESSION_PREFIXES: [&str; 5] = ["rs", "COSM", "COSV", "RCV", "VCV"];

///
/// How identifiers from the gene/xref/id parameters are told apart.
///
#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IdClassification {
    /// Every non-empty identifier is a gene. Matches what the indexer-side parser has
    /// always done, so xrefs are only ever found in the gene branch.
    Legacy,
    /// Colon separated ids (`HP:0000545`, `OMIM:269600`) and accessions such as
    /// `rs123`, `COSM476` or `RCV000012345` are xrefs, anything else is a gene symbol.
    #[default]
    Accession,
}

fn is_accession(id: &str) -> bool {
    ACCESSION_PREFIXES.iter().any(|prefix| {
        id.get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
            && id.len() > prefix.len()
            && id[prefix.len()..].bytes().all(|b| b.is_ascii_digit())
    })
}

impl IdClassification {
    pub fn is_gene(&self, id: &str) -> bool {
        if id.is_empty() {
            return false;
        }
        match self {
            IdClassification::Legacy => true,
            IdClassification::Accession => !id.contains(':') && !is_accession(id),
        }
    }
}

///
/// Identifiers collected from every id-like parameter, split into xrefs and genes
///
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedIds {
    pub xrefs: Vec<String>,
    pub genes: Vec<String>,
}

impl ClassifiedIds {
    ///
    /// Split a value on `,`/`;` and push every id into the xref or gene list.
    ///
    pub fn classify(&mut self, value: &str, mode: IdClassification) {
        for id in split_any(value) {
            if mode.is_gene(id) {
                self.genes.push(id.to_string());
            } else {
                self.xrefs.push(id.to_string());
            }
        }
    }
}
