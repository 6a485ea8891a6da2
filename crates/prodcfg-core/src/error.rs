//! Error types for Prodcfg core types.
//!
//! These errors describe structurally broken templates or values. Anything
//! that can be corrected at configuration time (a bad option, an
//! out-of-range number) is not an error here.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type ProdcfgResult<T> = Result<T, ProdcfgError>;

/// The main error type for core operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProdcfgError {
    /// A cell reference is not in A1 notation.
    #[error("Invalid cell reference: {reference:?}")]
    InvalidCellRef {
        /// The rejected reference.
        reference: String,
    },

    /// A product template is internally inconsistent.
    #[error("Invalid definition for product '{product}': {reason}")]
    InvalidDefinition {
        /// Product name.
        product: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A config refers to a parameter the product does not declare.
    #[error("Unknown parameter: {name}")]
    UnknownParameter {
        /// Parameter name.
        name: String,
    },
}

impl ProdcfgError {
    /// Creates an invalid cell reference error.
    #[must_use]
    pub fn invalid_cell_ref(reference: impl Into<String>) -> Self {
        Self::InvalidCellRef {
            reference: reference.into(),
        }
    }

    /// Creates an invalid definition error.
    #[must_use]
    pub fn invalid_definition(product: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDefinition {
            product: product.into(),
            reason: reason.into(),
        }
    }

    /// Creates an unknown parameter error.
    #[must_use]
    pub fn unknown_parameter(name: impl Into<String>) -> Self {
        Self::UnknownParameter { name: name.into() }
    }
}
