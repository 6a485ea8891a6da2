//! # Prodcfg Ext File
//!
//! File-based and in-memory collaborators for the Prodcfg configurator.
//!
//! This crate provides default implementations for tests, demos and static
//! deployments:
//! - JSON product registry
//! - JSON product template catalog
//! - In-memory workbook with closure formulas
//! - JSON workbook engine with a registry of named formulas
//!
//! A general formula language is out of scope; plug a real spreadsheet engine
//! in through [`prodcfg_traits::SpreadsheetEngine`] for that.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod catalog;
mod formulas;
mod registry;
mod spreadsheet;
mod workbook;

pub use catalog::*;
pub use formulas::*;
pub use registry::*;
pub use spreadsheet::{JsonSpreadsheetEngine, MemorySpreadsheetEngine};
pub use workbook::*;

use std::path::Path;
use std::sync::Arc;

use prodcfg_traits::catalog::ProductCatalog;
use prodcfg_traits::error::TraitError;
use prodcfg_traits::registry::{EntryKind, ProductRegistry, RegistryEntry};
use prodcfg_traits::spreadsheet::SpreadsheetEngine;

/// The three collaborators a configurator needs.
#[derive(Clone)]
pub struct FileSources {
    /// Product registry
    pub registry: Arc<dyn ProductRegistry>,
    /// Product templates
    pub catalog: Arc<dyn ProductCatalog>,
    /// Workbook loader
    pub spreadsheets: Arc<dyn SpreadsheetEngine>,
}

/// Create file-backed collaborators.
///
/// A missing registry file yields an empty registry; missing templates and
/// workbooks surface when they are first requested.
pub fn create_file_sources(
    registry_file: impl AsRef<Path>,
    products_dir: impl AsRef<Path>,
    workbooks_dir: impl AsRef<Path>,
) -> Result<FileSources, TraitError> {
    Ok(FileSources {
        registry: Arc::new(JsonRegistry::new(registry_file)?),
        catalog: Arc::new(JsonProductCatalog::new(products_dir)),
        spreadsheets: Arc::new(JsonSpreadsheetEngine::new(workbooks_dir)),
    })
}

// =============================================================================
// EMPTY SOURCES
// =============================================================================

/// Registry that knows nothing.
pub struct EmptyRegistry;

impl ProductRegistry for EmptyRegistry {
    fn find_by_name_and_type(
        &self,
        _name: &str,
        _kind: EntryKind,
    ) -> Result<Option<RegistryEntry>, TraitError> {
        Ok(None)
    }

    fn list(&self, _kind: EntryKind) -> Result<Vec<RegistryEntry>, TraitError> {
        Ok(Vec::new())
    }
}
