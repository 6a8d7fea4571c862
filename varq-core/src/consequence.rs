//! Sequence Ontology consequence types and their accession numbers.
use std::sync::LazyLock;

use fxhash::FxHashMap as HashMap;

use crate::errors::{QueryError, Result};

/// Consequence type terms and their SO accession numbers.
pub const CONSEQUENCE_TYPES: &[(&str, u32)] = &[
    ("transcript_ablation", 1893),
    ("splice_acceptor_variant", 1574),
    ("splice_donor_variant", 1575),
    ("stop_gained", 1587),
    ("frameshift_variant", 1589),
    ("stop_lost", 1578),
    ("start_lost", 2012),
    ("initiator_codon_variant", 1582),
    ("transcript_amplification", 1889),
    ("inframe_insertion", 1821),
    ("inframe_deletion", 1822),
    ("missense_variant", 1583),
    ("protein_altering_variant", 1818),
    ("splice_region_variant", 1630),
    ("incomplete_terminal_codon_variant", 1626),
    ("start_retained_variant", 2019),
    ("stop_retained_variant", 1567),
    ("synonymous_variant", 1819),
    ("coding_sequence_variant", 1580),
    ("mature_miRNA_variant", 1620),
    ("5_prime_UTR_variant", 1623),
    ("3_prime_UTR_variant", 1624),
    ("exon_variant", 1791),
    ("non_coding_transcript_exon_variant", 1792),
    ("intron_variant", 1627),
    ("NMD_transcript_variant", 1621),
    ("non_coding_transcript_variant", 1619),
    ("2KB_upstream_variant", 1636),
    ("upstream_gene_variant", 1631),
    ("downstream_gene_variant", 1632),
    ("TFBS_ablation", 1895),
    ("TFBS_amplification", 1892),
    ("TF_binding_site_variant", 1782),
    ("regulatory_region_ablation", 1894),
    ("regulatory_region_amplification", 1891),
    ("feature_elongation", 1907),
    ("regulatory_region_variant", 1566),
    ("feature_truncation", 1906),
    ("intergenic_variant", 1628),
];

static TERM_TO_ACCESSION: LazyLock<HashMap<&'static str, u32>> =
    LazyLock::new(|| CONSEQUENCE_TYPES.iter().copied().collect());

static ACCESSION_TO_TERM: LazyLock<HashMap<u32, &'static str>> = LazyLock::new(|| {
    CONSEQUENCE_TYPES
        .iter()
        .map(|(term, accession)| (*accession, *term))
        .collect()
});

///
/// Resolve a consequence type into its SO accession number.
///
/// # Arguments
/// - so: a term (`missense_variant`), a prefixed accession (`SO:0001583`) or a bare number (`1583`)
///
pub fn parse_consequence_type(so: &str) -> Result<u32> {
    let so = so.trim();
    let number = match so.get(..3) {
        Some(prefix) if prefix.eq_ignore_ascii_case("SO:") => Some(&so[3..]),
        _ if !so.is_empty() && so.bytes().all(|b| b.is_ascii_digit()) => Some(so),
        _ => None,
    };

    match number {
        Some(number) => {
            let accession = number
                .parse::<u32>()
                .map_err(|_| QueryError::InvalidSoAccession(so.to_string()))?;
            if !ACCESSION_TO_TERM.contains_key(&accession) {
                return Err(QueryError::UnknownSoAccession(so.to_string()));
            }
            Ok(accession)
        }
        None => TERM_TO_ACCESSION
            .get(so)
            .copied()
            .ok_or_else(|| QueryError::UnknownSoTerm(so.to_string())),
    }
}

/// Term for an accession number, if known.
pub fn consequence_type_term(accession: u32) -> Option<&'static str> {
    ACCESSION_TO_TERM.get(&accession).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("missense_variant", 1583)]
    #[case("SO:0001583", 1583)]
    #[case("so:0001578", 1578)]
    #[case("1587", 1587)]
    fn test_parse_consequence_type(#[case] so: &str, #[case] expected: u32) {
        assert_eq!(parse_consequence_type(so).unwrap(), expected);
    }

    #[rstest]
    fn test_unknown_consequence_types() {
        assert!(matches!(
            parse_consequence_type("not_a_term"),
            Err(QueryError::UnknownSoTerm(_))
        ));
        assert!(matches!(
            parse_consequence_type("SO:9999999"),
            Err(QueryError::UnknownSoAccession(_))
        ));
        assert!(matches!(
            parse_consequence_type("SO:abc"),
            Err(QueryError::InvalidSoAccession(_))
        ));
    }

    #[rstest]
    fn test_table_has_no_duplicate_accessions() {
        assert_eq!(ACCESSION_TO_TERM.len(), CONSEQUENCE_TYPES.len());
        assert_eq!(consequence_type_term(1583), Some("missense_variant"));
    }
}
