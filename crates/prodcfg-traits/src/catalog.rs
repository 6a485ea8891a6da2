//! Product template storage.

use std::sync::Arc;

use prodcfg_core::ProductDefinition;

use crate::error::TraitError;

/// Source of immutable product templates.
///
/// Implementations hand out shared templates; callers clone before
/// annotating them.
pub trait ProductCatalog: Send + Sync {
    /// Get the template for a product.
    fn definition(&self, name: &str) -> Result<Option<Arc<ProductDefinition>>, TraitError>;
}
