//! # Prodcfg Engine
//!
//! The product configuration engine.
//!
//! This crate provides:
//! - [`codec`]: config path parsing and serialization
//! - [`validation`]: static config checks and repair
//! - [`Resolver`]: the fixed-point loop over a formula workbook
//! - [`materializer`]: the render-ready [`ConfiguredProduct`](prodcfg_core::ConfiguredProduct)
//! - [`ProductConfigurator`]: the service tying them to the collaborators
//!
//! ## Architecture
//!
//! ```text
//! config path ─> codec ─> validation ─┬─> (strict: reject)
//!                                     │
//!                                     └─> repair ─> Resolver ─┬─> Workbook
//!                                                             │   (write, recalc, read)
//!                                                             └─> materializer ─> product
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let engine = ProductConfiguratorBuilder::new()
//!     .with_registry(registry)
//!     .with_catalog(catalog)
//!     .with_spreadsheets(spreadsheets)
//!     .with_config(EngineConfig::default())
//!     .build()?;
//!
//! let tshirt = engine.configure("tshirt", Some("M/white/10"), ResolveMode::Lenient);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod builder;
pub mod codec;
pub mod configurator;
pub mod error;
pub mod materializer;
pub mod resolver;
pub mod validation;

// Re-exports
pub use builder::ProductConfiguratorBuilder;
pub use configurator::{Configured, ProductConfigurator, ResolutionReport, ResolveMode};
pub use error::EngineError;
pub use resolver::{Resolution, ResolvedConfig, Resolver};
pub use validation::Violation;
