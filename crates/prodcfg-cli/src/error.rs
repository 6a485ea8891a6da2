//! CLI error types.

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The product could not be configured as requested.
    #[error("Cannot configure '{product}': {reason}")]
    NotConfigured {
        /// Product name
        product: String,
        /// Why resolution failed
        reason: String,
    },

    /// A configuration path failed the exact-match check.
    #[error("'{path}' is not a valid configuration of '{product}'")]
    InvalidPath {
        /// Product name
        product: String,
        /// The checked path
        path: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
