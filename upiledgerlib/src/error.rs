//! Public error types.

use thiserror::Error;

/// The reconstructed text does not follow the statement grammar.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unrecognized statement header: {reason}")]
    UnrecognizedHeader { reason: String },

    #[error("malformed record at page {page}, line {line}: {reason} ({text:?})")]
    MalformedRecord {
        page: u32,
        line: usize,
        text: String,
        reason: String,
    },

    #[error("line grammar matcher {matcher} does not compile: {reason}")]
    Grammar { matcher: &'static str, reason: String },
}

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input error: {0}")]
    Input(String),

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
