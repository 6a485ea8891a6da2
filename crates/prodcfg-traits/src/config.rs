//! Engine configuration.
//!
//! Configuration contains:
//! - Resolution limits (maximum number of fixed-point passes)
//! - Recalculation behaviour and logging switches
//!
//! Configuration does NOT contain:
//! - Product templates (that's the catalog)
//! - Data locations (that's the extension wiring)

use serde::{Deserialize, Serialize};

/// Default cap on fixed-point passes.
pub const DEFAULT_MAX_PASSES: usize = 32;

/// Configurator engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum resolution passes before giving up.
    pub max_passes: usize,

    /// Log every recorded formula error at `warn`.
    pub log_formula_errors: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_passes: DEFAULT_MAX_PASSES,
            log_formula_errors: true,
        }
    }
}

impl EngineConfig {
    /// Set the pass cap.
    #[must_use]
    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes;
        self
    }
}
