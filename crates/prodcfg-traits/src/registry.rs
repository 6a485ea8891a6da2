//! Product registry traits.
//!
//! The registry is the switchboard of what may be configured: a product
//! template is only resolved when the registry knows it and has it enabled.

use serde::{Deserialize, Serialize};

use crate::error::TraitError;

// =============================================================================
// REGISTRY ENTRIES
// =============================================================================

/// Kind of registry entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// A configurable product
    Product,
    /// A container grouping products
    Category,
}

/// One registry entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryEntry {
    /// Entry name
    pub name: String,
    /// Entry kind
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Whether the entry may be served
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Display title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

fn default_enabled() -> bool {
    true
}

impl RegistryEntry {
    /// Create a product entry.
    pub fn product(name: impl Into<String>, enabled: bool) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Product,
            enabled,
            title: None,
        }
    }
}

// =============================================================================
// REGISTRY TRAIT
// =============================================================================

/// Lookup of registered entries.
pub trait ProductRegistry: Send + Sync {
    /// Find an entry by name and kind.
    fn find_by_name_and_type(
        &self,
        name: &str,
        kind: EntryKind,
    ) -> Result<Option<RegistryEntry>, TraitError>;

    /// List all entries of a kind.
    fn list(&self, kind: EntryKind) -> Result<Vec<RegistryEntry>, TraitError>;
}
