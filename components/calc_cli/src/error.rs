//! Error types for the CLI

use core_types::CalcError;
use thiserror::Error;

/// CLI-specific errors
#[derive(Debug, Error)]
pub enum CliError {
    /// The calculation was rejected
    #[error("{0}")]
    Calc(#[from] CalcError),

    /// An input line could not be turned into a request
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The loop ran dry before the promise settled
    #[error("event loop went idle with the result still pending")]
    Stalled,

    /// REPL error
    #[error("REPL error: {0}")]
    ReplError(String),
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;
