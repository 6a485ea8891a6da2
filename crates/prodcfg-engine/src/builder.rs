//! Builder pattern for the product configurator.

use std::sync::Arc;

use prodcfg_traits::catalog::ProductCatalog;
use prodcfg_traits::config::EngineConfig;
use prodcfg_traits::registry::ProductRegistry;
use prodcfg_traits::spreadsheet::SpreadsheetEngine;

use crate::configurator::ProductConfigurator;
use crate::error::EngineError;

/// Builder for constructing a [`ProductConfigurator`].
pub struct ProductConfiguratorBuilder {
    config: Option<EngineConfig>,
    registry: Option<Arc<dyn ProductRegistry>>,
    catalog: Option<Arc<dyn ProductCatalog>>,
    spreadsheets: Option<Arc<dyn SpreadsheetEngine>>,
}

impl ProductConfiguratorBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            config: None,
            registry: None,
            catalog: None,
            spreadsheets: None,
        }
    }

    /// Set the engine configuration.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the product registry.
    pub fn with_registry(mut self, registry: Arc<dyn ProductRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Set the template catalog.
    pub fn with_catalog(mut self, catalog: Arc<dyn ProductCatalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Set the spreadsheet engine.
    pub fn with_spreadsheets(mut self, spreadsheets: Arc<dyn SpreadsheetEngine>) -> Self {
        self.spreadsheets = Some(spreadsheets);
        self
    }

    /// Build the configurator.
    pub fn build(self) -> Result<ProductConfigurator, EngineError> {
        let config = self.config.unwrap_or_default();

        if config.max_passes == 0 {
            return Err(EngineError::ConfigError("max_passes must be at least 1".into()));
        }

        let registry = self
            .registry
            .ok_or_else(|| EngineError::ConfigError("registry not configured".into()))?;

        let catalog = self
            .catalog
            .ok_or_else(|| EngineError::ConfigError("catalog not configured".into()))?;

        let spreadsheets = self
            .spreadsheets
            .ok_or_else(|| EngineError::ConfigError("spreadsheets not configured".into()))?;

        Ok(ProductConfigurator::new(config, registry, catalog, spreadsheets))
    }
}

impl Default for ProductConfiguratorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
