//! Product configurator service.
//!
//! Wires the registry, the template catalog and the spreadsheet engine
//! around the codec, validator, resolver and materializer:
//!
//! ```text
//! name, path ──> registry ──> catalog ──> decode ──> validate/repair
//!                                                        │
//!            ConfiguredProduct <── finalize <── resolve <┘ (workbook)
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use prodcfg_core::{ConfiguredProduct, ProductDefinition};
use prodcfg_traits::catalog::ProductCatalog;
use prodcfg_traits::config::EngineConfig;
use prodcfg_traits::error::TraitError;
use prodcfg_traits::registry::{EntryKind, ProductRegistry, RegistryEntry};
use prodcfg_traits::spreadsheet::{FormulaError, SpreadsheetEngine};

use crate::error::EngineError;
use crate::resolver::{Resolution, Resolver};
use crate::{codec, materializer, validation};

/// How closely the result must match the request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolveMode {
    /// Repair invalid input and accept any adjustment.
    #[default]
    Lenient,
    /// Only succeed with exactly the requested configuration.
    Strict,
}

impl ResolveMode {
    /// Mode from a strict flag.
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            Self::Strict
        } else {
            Self::Lenient
        }
    }

    /// Whether this is [`ResolveMode::Strict`].
    pub fn is_strict(self) -> bool {
        self == Self::Strict
    }
}

/// How a configuration was arrived at.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionReport {
    /// Resolver passes
    pub passes: usize,
    /// Formula errors of the final recalculation
    pub formula_errors: Vec<FormulaError>,
    /// Whether the request failed the static check and was repaired
    pub repaired: bool,
}

/// A configured product with its diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configured {
    /// The product
    pub product: ConfiguredProduct,
    /// How it was resolved
    pub report: ResolutionReport,
}

/// Resolves product configurations.
///
/// Shares nothing mutable between calls: every call clones the template and
/// loads its own workbook, so one configurator can serve many threads.
pub struct ProductConfigurator {
    config: EngineConfig,
    resolver: Resolver,
    registry: Arc<dyn ProductRegistry>,
    catalog: Arc<dyn ProductCatalog>,
    spreadsheets: Arc<dyn SpreadsheetEngine>,
}

impl ProductConfigurator {
    /// Create a configurator. Prefer [`ProductConfiguratorBuilder`](crate::ProductConfiguratorBuilder).
    pub fn new(
        config: EngineConfig,
        registry: Arc<dyn ProductRegistry>,
        catalog: Arc<dyn ProductCatalog>,
        spreadsheets: Arc<dyn SpreadsheetEngine>,
    ) -> Self {
        Self {
            resolver: Resolver::new(config.max_passes),
            config,
            registry,
            catalog,
            spreadsheets,
        }
    }

    /// Engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Configure a product, or `None`.
    ///
    /// `None` covers every failure alike: unknown or disabled product, a
    /// strict request that would need adjusting, non-convergence and broken
    /// templates or workbooks. The reason is logged; use
    /// [`try_configure`](Self::try_configure) to get it.
    pub fn configure(
        &self,
        name: &str,
        path: Option<&str>,
        mode: ResolveMode,
    ) -> Option<ConfiguredProduct> {
        match self.try_configure(name, path, mode) {
            Ok(configured) => Some(configured.product),
            Err(e) if e.is_not_found() => {
                debug!("{name} {:?}: {e}", path.unwrap_or_default());
                None
            }
            Err(e) => {
                warn!("{name} {:?}: {e}", path.unwrap_or_default());
                None
            }
        }
    }

    /// The all-defaults configuration of a product.
    pub fn defaults(&self, name: &str) -> Option<ConfiguredProduct> {
        self.configure(name, None, ResolveMode::Lenient)
    }

    /// Configure a product, reporting why it failed.
    pub fn try_configure(
        &self,
        name: &str,
        path: Option<&str>,
        mode: ResolveMode,
    ) -> Result<Configured, EngineError> {
        let mut product = self.template(name)?;

        let requested = codec::decode(&product, path);
        let violations = validation::violations(&product, &requested);
        let repaired = !violations.is_empty();

        let config = if !repaired {
            requested
        } else if mode.is_strict() {
            return Err(EngineError::InvalidStaticConfig {
                product: product.name,
                violations,
            });
        } else {
            debug!("{name}: repairing {} violation(s)", violations.len());
            validation::repair(&product, &requested)
        };

        let mut workbook = self.spreadsheets.load(&product.workbook.document)?;
        let sheet = match &product.workbook.sheet {
            Some(sheet) => sheet.clone(),
            None => workbook.sheet_names().into_iter().next().ok_or_else(|| {
                TraitError::InvalidInput(format!(
                    "workbook {} has no sheets",
                    product.workbook.document
                ))
            })?,
        };

        let resolved = match self
            .resolver
            .resolve(&mut product, config, &mut *workbook, &sheet)?
        {
            Resolution::Resolved(resolved) => resolved,
            Resolution::DidNotConverge { passes, .. } => {
                return Err(EngineError::DidNotConverge {
                    product: product.name,
                    passes,
                });
            }
        };

        if self.config.log_formula_errors {
            for e in &resolved.formula_errors {
                warn!("{name}: formula error in {}!{}: {}", e.sheet, e.cell, e.message);
            }
        }

        let configured = materializer::finalize(product, &resolved.config, &*workbook, &sheet)?;

        if mode.is_strict() {
            let requested = path.unwrap_or_default();
            if configured.config_path != requested {
                return Err(EngineError::StrictMismatch {
                    requested: requested.to_string(),
                    resolved: configured.config_path,
                });
            }
        }

        info!(
            "Configured {} as '{}' in {} pass(es)",
            name, configured.config_path, resolved.passes
        );

        Ok(Configured {
            product: configured,
            report: ResolutionReport {
                passes: resolved.passes,
                formula_errors: resolved.formula_errors,
                repaired,
            },
        })
    }

    /// Registered products.
    pub fn products(&self) -> Result<Vec<RegistryEntry>, EngineError> {
        Ok(self.registry.list(EntryKind::Product)?)
    }

    /// A private copy of an enabled product's template.
    fn template(&self, name: &str) -> Result<ProductDefinition, EngineError> {
        let entry = self
            .registry
            .find_by_name_and_type(name, EntryKind::Product)?
            .ok_or_else(|| EngineError::ProductNotFound(name.to_string()))?;
        if !entry.enabled {
            return Err(EngineError::ProductDisabled(name.to_string()));
        }

        let template = self
            .catalog
            .definition(name)?
            .ok_or_else(|| EngineError::ProductNotFound(name.to_string()))?;

        Ok(ProductDefinition::clone(&template))
    }
}
