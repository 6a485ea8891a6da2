//! # Prodcfg Traits
//!
//! Trait definitions for the Prodcfg configuration engine.
//!
//! This crate contains ONLY trait definitions and the plain data they exchange.
//! All implementations are in separate extension crates.
//!
//! ## Module Structure
//!
//! - [`registry`]: Product registry lookups (does the product exist, is it enabled)
//! - [`catalog`]: Static product template storage
//! - [`spreadsheet`]: Workbook capability (load, write, recalculate, read)
//! - [`config`]: Engine configuration
//!
//! ## Dependency Injection
//!
//! The configurator uses these traits via dependency injection:
//!
//! ```ignore
//! ProductConfiguratorBuilder::new()
//!     .with_registry(impl ProductRegistry)
//!     .with_catalog(impl ProductCatalog)
//!     .with_spreadsheets(impl SpreadsheetEngine)
//!     .with_config(EngineConfig)
//!     .build()
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod catalog;
pub mod config;
pub mod error;
pub mod registry;
pub mod spreadsheet;

// Re-export commonly used types
pub use catalog::ProductCatalog;
pub use config::EngineConfig;
pub use error::TraitError;
pub use registry::{EntryKind, ProductRegistry, RegistryEntry};
pub use spreadsheet::{FormulaError, RecalcOptions, RecalcReport, SpreadsheetEngine, Workbook};
