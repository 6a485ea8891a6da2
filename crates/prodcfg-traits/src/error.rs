//! Error types for trait operations.

use thiserror::Error;

/// Common error type for collaborator operations.
#[derive(Debug, Error)]
pub enum TraitError {
    /// Requested resource not found
    #[error("not found: {0}")]
    NotFound(String),

    /// Parse/deserialization error
    #[error("parse error: {0}")]
    ParseError(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(String),

    /// Invalid input
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A formula failed while recalculation was asked to stop on errors
    #[error("formula error in {sheet}!{cell}: {message}")]
    Formula {
        /// Sheet name
        sheet: String,
        /// Cell address
        cell: String,
        /// Evaluation error
        message: String,
    },

    /// Sheet does not exist in the workbook
    #[error("unknown sheet: {0}")]
    UnknownSheet(String),
}

impl From<std::io::Error> for TraitError {
    fn from(e: std::io::Error) -> Self {
        TraitError::IoError(e.to_string())
    }
}

impl From<prodcfg_core::ProdcfgError> for TraitError {
    fn from(e: prodcfg_core::ProdcfgError) -> Self {
        TraitError::InvalidInput(e.to_string())
    }
}
