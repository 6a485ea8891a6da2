//! # Prodcfg Core
//!
//! Core types for the Prodcfg product configuration engine.
//!
//! This crate provides the building blocks shared by every other crate:
//!
//! - **Products**: `ProductDefinition`, the immutable template a product is
//!   configured from, and `ConfiguredProduct`, the materialized result
//! - **Parameters**: the closed set of parameter kinds (select, number,
//!   quantity) and select options
//! - **Configs**: `Config`, the keyed candidate values, and `ParamValue`
//! - **Cells**: `CellRef`, `CellValue` and `Source`, the literal-or-cell
//!   indirection used for bounds, weights and price tiers
//!
//! ## Design Philosophy
//!
//! - **Type Safety**: parameter kinds are an enum, so every consumer has to
//!   handle all of them
//! - **Serde First**: the JSON template format is the serde shape of these types
//! - **Decimal Arithmetic**: numeric values never round-trip through floats
//!
//! ## Example
//!
//! ```rust
//! use prodcfg_core::prelude::*;
//!
//! let cell = CellRef::parse("b2").unwrap();
//! assert_eq!(cell.as_str(), "B2");
//!
//! let value = ParamValue::text("M");
//! assert_eq!(value.to_string(), "M");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]

pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{ProdcfgError, ProdcfgResult};
    pub use crate::types::{
        parse_number, CellRef, CellValue, Config, ConfiguredProduct, NumericParameter,
        ParamValue, ParameterDefinition, ParameterKind, PriceTier, ProductDefinition,
        ResolvedPrice, SelectOption, Source, WorkbookRef,
    };
}

// Re-export commonly used types at crate root
pub use error::{ProdcfgError, ProdcfgResult};
pub use types::{
    parse_number, CellRef, CellValue, Config, ConfiguredProduct, NumericParameter, ParamValue,
    ParameterDefinition, ParameterKind, PriceTier, ProductDefinition, ResolvedPrice,
    SelectOption, Source, WorkbookRef,
};
