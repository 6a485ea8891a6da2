//! Domain types for product configuration.

mod cell;
mod config;
mod parameter;
mod product;
mod value;

pub use cell::{CellRef, CellValue, Source};
pub use config::Config;
pub use parameter::{NumericParameter, ParameterDefinition, ParameterKind, SelectOption};
pub use product::{ConfiguredProduct, PriceTier, ProductDefinition, ResolvedPrice, WorkbookRef};
pub use value::{parse_number, ParamValue};
