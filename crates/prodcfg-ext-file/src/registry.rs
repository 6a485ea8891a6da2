//! File-based and in-memory product registries.

use std::path::{Path, PathBuf};

use dashmap::DashMap;
use tracing::debug;

use prodcfg_traits::error::TraitError;
use prodcfg_traits::registry::{EntryKind, ProductRegistry, RegistryEntry};

// =============================================================================
// JSON REGISTRY
// =============================================================================

/// Registry loaded from a JSON array of entries.
///
/// ```json
/// [
///   { "name": "apparel", "type": "category" },
///   { "name": "tshirt", "type": "product", "enabled": true }
/// ]
/// ```
pub struct JsonRegistry {
    file_path: PathBuf,
    entries: DashMap<(EntryKind, String), RegistryEntry>,
}

impl JsonRegistry {
    /// Create a registry backed by a JSON file.
    pub fn new(file_path: impl AsRef<Path>) -> Result<Self, TraitError> {
        let registry = Self {
            file_path: file_path.as_ref().to_path_buf(),
            entries: DashMap::new(),
        };
        registry.reload()?;
        Ok(registry)
    }

    /// Reload entries from file.
    pub fn reload(&self) -> Result<(), TraitError> {
        self.entries.clear();

        if !self.file_path.exists() {
            return Ok(()); // Empty registry
        }

        let content = std::fs::read_to_string(&self.file_path)?;
        let entries: Vec<RegistryEntry> =
            serde_json::from_str(&content).map_err(|e| TraitError::ParseError(e.to_string()))?;

        debug!(
            "Loaded {} registry entries from {}",
            entries.len(),
            self.file_path.display()
        );

        for entry in entries {
            self.entries.insert((entry.kind, entry.name.clone()), entry);
        }

        Ok(())
    }
}

impl ProductRegistry for JsonRegistry {
    fn find_by_name_and_type(
        &self,
        name: &str,
        kind: EntryKind,
    ) -> Result<Option<RegistryEntry>, TraitError> {
        Ok(self
            .entries
            .get(&(kind, name.to_string()))
            .map(|e| e.value().clone()))
    }

    fn list(&self, kind: EntryKind) -> Result<Vec<RegistryEntry>, TraitError> {
        Ok(sorted(
            self.entries
                .iter()
                .filter(|e| e.key().0 == kind)
                .map(|e| e.value().clone()),
        ))
    }
}

// =============================================================================
// IN-MEMORY REGISTRY
// =============================================================================

/// In-memory mutable registry.
#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    entries: DashMap<(EntryKind, String), RegistryEntry>,
}

impl InMemoryRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an entry.
    pub fn insert(&self, entry: RegistryEntry) {
        self.entries.insert((entry.kind, entry.name.clone()), entry);
    }

    /// Builder form registering a product.
    #[must_use]
    pub fn with_product(self, name: &str, enabled: bool) -> Self {
        self.insert(RegistryEntry::product(name, enabled));
        self
    }

    /// Remove an entry.
    pub fn remove(&self, name: &str, kind: EntryKind) -> Option<RegistryEntry> {
        self.entries
            .remove(&(kind, name.to_string()))
            .map(|(_, entry)| entry)
    }
}

impl ProductRegistry for InMemoryRegistry {
    fn find_by_name_and_type(
        &self,
        name: &str,
        kind: EntryKind,
    ) -> Result<Option<RegistryEntry>, TraitError> {
        Ok(self
            .entries
            .get(&(kind, name.to_string()))
            .map(|e| e.value().clone()))
    }

    fn list(&self, kind: EntryKind) -> Result<Vec<RegistryEntry>, TraitError> {
        Ok(sorted(
            self.entries
                .iter()
                .filter(|e| e.key().0 == kind)
                .map(|e| e.value().clone()),
        ))
    }
}

fn sorted(entries: impl Iterator<Item = RegistryEntry>) -> Vec<RegistryEntry> {
    let mut entries: Vec<RegistryEntry> = entries.collect();
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    entries
}
