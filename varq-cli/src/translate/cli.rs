use clap::{Arg, Command, arg};

pub use varq_solr::consts::TRANSLATE_CMD;

pub const DEFAULT_FORMAT: &str = "params";

pub fn create_translate_cli() -> Command {
    Command::new(TRANSLATE_CMD)
        .author("Databio")
        .about("Translate a variant query file (json, yaml or toml) into Solr query parameters.")
        .arg_required_else_help(true)
        .arg(Arg::new("query").help("Path to the query file").required(true))
        .arg(arg!(-o --options <options> "Path to a query options file (limit, skip, sort, facets...)"))
        .arg(arg!(-m --metadata <metadata> "Path to a metadata toml file with studies and GO terms"))
        .arg(arg!(-c --config <config> "Path to a translator config toml file"))
        .arg(
            arg!(-f --format <format> "Output format")
                .value_parser(["params", "json"])
                .default_value(DEFAULT_FORMAT),
        )
}
