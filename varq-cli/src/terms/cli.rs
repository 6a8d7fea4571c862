use clap::{Command, arg};

pub use varq_solr::consts::SO_TERMS_CMD;

pub fn create_so_terms_cli() -> Command {
    Command::new(SO_TERMS_CMD)
        .author("Databio")
        .about("List the consequence type terms and SO accessions understood by annot-ct.")
        .arg(arg!([term] "Only resolve this term or accession"))
}
