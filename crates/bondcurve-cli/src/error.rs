//! CLI error types.

use std::path::PathBuf;
use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Neither a file nor a sample was given.
    #[error("No portfolio given. Use --file <PATH> or --sample <NAME>.")]
    NoPortfolio,

    /// The portfolio file extension is not supported.
    #[error("Unsupported portfolio file {}: expected .csv or .json", path.display())]
    UnsupportedInput {
        /// File involved.
        path: PathBuf,
    },

    /// The portfolio file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The portfolio file could not be parsed.
    #[error("Failed to parse {}: {message}", path.display())]
    Parse {
        /// File involved.
        path: PathBuf,
        /// Parser message.
        message: String,
    },

    /// A bond id does not exist in the portfolio.
    #[error("Bond '{0}' is not in the portfolio")]
    BondNotFound(String),

    /// Missing required argument.
    #[error("Missing required argument: {0}")]
    MissingArgument(String),

    /// Invalid argument value.
    #[error("Invalid value for {name}: {reason}")]
    InvalidArgument {
        /// Argument name.
        name: &'static str,
        /// What is wrong.
        reason: String,
    },
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
