//! File-based and in-memory product catalogs.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;

use prodcfg_core::ProductDefinition;
use prodcfg_traits::catalog::ProductCatalog;
use prodcfg_traits::error::TraitError;

use crate::spreadsheet::resolve_document;

// =============================================================================
// JSON PRODUCT CATALOG
// =============================================================================

/// Catalog reading `<dir>/<name>.json` templates.
///
/// Each template is parsed and validated on first request, then served from
/// the cache until [`reload`](Self::reload).
pub struct JsonProductCatalog {
    dir: PathBuf,
    cache: DashMap<String, Arc<ProductDefinition>>,
}

impl JsonProductCatalog {
    /// Create a catalog over a directory of template files.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            cache: DashMap::new(),
        }
    }

    /// Drop every cached template.
    pub fn reload(&self) {
        self.cache.clear();
    }

    /// Number of templates currently cached.
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    fn load(&self, name: &str) -> Result<Option<ProductDefinition>, TraitError> {
        let path = resolve_document(&self.dir, &format!("{name}.json"))?;
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path)?;
        let definition: ProductDefinition = serde_json::from_str(&content)
            .map_err(|e| TraitError::ParseError(format!("{}: {e}", path.display())))?;

        if definition.name != name {
            return Err(TraitError::InvalidInput(format!(
                "template {} declares name '{}', expected '{}'",
                path.display(),
                definition.name,
                name
            )));
        }
        definition.validate()?;

        debug!(
            "Loaded product template '{}' ({} parameters)",
            name,
            definition.parameters.len()
        );
        Ok(Some(definition))
    }
}

impl ProductCatalog for JsonProductCatalog {
    fn definition(&self, name: &str) -> Result<Option<Arc<ProductDefinition>>, TraitError> {
        if let Some(cached) = self.cache.get(name) {
            return Ok(Some(Arc::clone(cached.value())));
        }

        let Some(definition) = self.load(name)? else {
            return Ok(None);
        };

        let definition = Arc::new(definition);
        self.cache.insert(name.to_string(), Arc::clone(&definition));
        Ok(Some(definition))
    }
}

// =============================================================================
// IN-MEMORY CATALOG
// =============================================================================

/// In-memory catalog.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    definitions: DashMap<String, Arc<ProductDefinition>>,
}

impl InMemoryCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a template after validating it.
    pub fn insert(&self, definition: ProductDefinition) -> Result<(), TraitError> {
        definition.validate()?;
        self.definitions
            .insert(definition.name.clone(), Arc::new(definition));
        Ok(())
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with_definition(self, definition: ProductDefinition) -> Result<Self, TraitError> {
        self.insert(definition)?;
        Ok(self)
    }
}

impl ProductCatalog for InMemoryCatalog {
    fn definition(&self, name: &str) -> Result<Option<Arc<ProductDefinition>>, TraitError> {
        Ok(self.definitions.get(name).map(|d| Arc::clone(d.value())))
    }
}
