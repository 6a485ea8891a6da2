//! Engine error types.

use rust_decimal::Decimal;
use thiserror::Error;

use prodcfg_core::ProdcfgError;
use prodcfg_traits::TraitError;

use crate::validation::Violation;

/// Engine error type.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration error
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// Product unknown to the registry or the catalog
    #[error("product not found: {0}")]
    ProductNotFound(String),

    /// Product registered but disabled
    #[error("product disabled: {0}")]
    ProductDisabled(String),

    /// Strict request failed the static check
    #[error("invalid configuration for {product}: {}", describe(.violations))]
    InvalidStaticConfig {
        /// Product name
        product: String,
        /// Every failed check
        violations: Vec<Violation>,
    },

    /// Strict request resolved to a different configuration
    #[error("requested configuration '{requested}' resolves to '{resolved}'")]
    StrictMismatch {
        /// Path the caller asked for
        requested: String,
        /// Path resolution produced
        resolved: String,
    },

    /// Pass cap exceeded
    #[error("resolution of {product} did not converge after {passes} passes")]
    DidNotConverge {
        /// Product name
        product: String,
        /// Passes run
        passes: usize,
    },

    /// Every option of a select parameter is disabled
    #[error("no enabled option for parameter '{parameter}'")]
    NoSelectableOption {
        /// Parameter name
        parameter: String,
    },

    /// A disabled parameter has no fallback option
    #[error("parameter '{parameter}' is disabled and has no fallback option")]
    MissingFallback {
        /// Parameter name
        parameter: String,
    },

    /// Resolved bounds are inverted
    #[error("parameter '{parameter}' resolved min {min} above max {max}")]
    InvalidBounds {
        /// Parameter name
        parameter: String,
        /// Resolved lower bound
        min: Decimal,
        /// Resolved upper bound
        max: Decimal,
    },

    /// Calculation error
    #[error("calculation error: {0}")]
    CalculationError(String),

    /// Collaborator failure (registry, catalog, workbook)
    #[error(transparent)]
    Source(#[from] TraitError),

    /// Malformed template
    #[error(transparent)]
    Definition(#[from] ProdcfgError),
}

impl EngineError {
    /// Whether this is one of the "no such configuration" conditions, as
    /// opposed to a broken template, workbook or collaborator.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ProductNotFound(_)
                | Self::ProductDisabled(_)
                | Self::InvalidStaticConfig { .. }
                | Self::StrictMismatch { .. }
        )
    }
}

fn describe(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
