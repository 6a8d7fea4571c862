use thiserror::Error;

///
/// Errors raised while interpreting a variant query. All of them are client input
/// errors: nothing is retried and no partial result is produced.
///
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Comma and semi-colon cannot be mixed: {0}")]
    MixedSeparators(String),

    #[error("Invalid expression {0}")]
    MalformedExpression(String),

    #[error("Error parsing region: {0}")]
    RegionParseError(String),

    #[error("Invalid SO number \"{0}\"")]
    InvalidSoAccession(String),

    #[error("Unknown SO number {0}")]
    UnknownSoAccession(String),

    #[error("Unknown SO term {0}")]
    UnknownSoTerm(String),
}

pub type Result<T> = std::result::Result<T, QueryError>;
