mod terms;
mod translate;

use anyhow::Result;
use clap::{Command, arg};
use log::LevelFilter;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "varq";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .author("Databio")
        .about("Translate variant attribute queries into Solr filter queries.")
        .subcommand_required(true)
        .arg(arg!(-v --verbose ... "Increase logging verbosity").global(true))
        .subcommand(translate::cli::create_translate_cli())
        .subcommand(terms::cli::create_so_terms_cli())
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    init_logging(matches.get_count("verbose"));

    match matches.subcommand() {
        //
        // TRANSLATE
        //
        Some((translate::cli::TRANSLATE_CMD, matches)) => {
            translate::handlers::run_translate(matches)?;
        }

        //
        // SO TERMS
        //
        Some((terms::cli::SO_TERMS_CMD, matches)) => {
            terms::handlers::run_so_terms(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
