use std::io::{self, BufWriter, Write};

use anyhow::Result;
use clap::ArgMatches;

use varq_core::consequence::{CONSEQUENCE_TYPES, consequence_type_term};
use varq_core::parse_consequence_type;

///
/// Resolve a term or accession to its `term<TAB>SO:accession` line. Accessions are
/// printed with their canonical term.
///
pub fn so_term_line(so: &str) -> Result<String> {
    let accession = parse_consequence_type(so)?;
    let term = consequence_type_term(accession).unwrap_or(so);
    Ok(format!("{}\tSO:{:07}", term, accession))
}

pub fn run_so_terms(matches: &ArgMatches) -> Result<()> {
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());

    match matches.get_one::<String>("term") {
        Some(term) => {
            writeln!(writer, "{}", so_term_line(term)?)?;
        }
        None => {
            for (term, accession) in CONSEQUENCE_TYPES {
                writeln!(writer, "{}\tSO:{:07}", term, accession)?;
            }
        }
    }

    writer.flush()?;

    Ok(())
}
