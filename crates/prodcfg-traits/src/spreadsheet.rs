//! Spreadsheet engine traits.
//!
//! Formula evaluation is a black box behind these traits: the configurator
//! only ever loads a workbook, writes cells, asks for a recalculation and
//! reads cells back.
//!
//! - [`SpreadsheetEngine`]: loads a fresh workbook per call
//! - [`Workbook`]: one loaded, privately owned workbook

use prodcfg_core::{CellRef, CellValue};
use serde::{Deserialize, Serialize};

use crate::error::TraitError;

// =============================================================================
// RECALCULATION
// =============================================================================

/// Options for a recalculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecalcOptions {
    /// Keep evaluating after a formula fails. Failing cells hold an error value.
    pub continue_on_error: bool,
}

impl Default for RecalcOptions {
    fn default() -> Self {
        Self {
            continue_on_error: true,
        }
    }
}

/// A formula that failed during recalculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormulaError {
    /// Sheet name
    pub sheet: String,
    /// Cell address
    pub cell: CellRef,
    /// Evaluation error
    pub message: String,
}

/// Outcome of a recalculation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecalcReport {
    /// Number of formula cells evaluated
    pub evaluated: usize,
    /// Formulas that failed
    pub errors: Vec<FormulaError>,
}

impl RecalcReport {
    /// Whether every formula evaluated cleanly.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

// =============================================================================
// WORKBOOK TRAITS
// =============================================================================

/// A loaded workbook.
///
/// Reading a cell that was never written yields [`CellValue::Empty`].
pub trait Workbook: Send {
    /// Sheet names in document order.
    fn sheet_names(&self) -> Vec<String>;

    /// Read a cell.
    fn get_cell(&self, sheet: &str, cell: &CellRef) -> Result<CellValue, TraitError>;

    /// Write a cell.
    fn set_cell(&mut self, sheet: &str, cell: &CellRef, value: CellValue) -> Result<(), TraitError>;

    /// Recalculate every formula.
    fn recalculate(&mut self, options: RecalcOptions) -> Result<RecalcReport, TraitError>;
}

/// Loads workbooks by document name.
pub trait SpreadsheetEngine: Send + Sync {
    /// Load a fresh copy of a workbook. Each call returns an independent workbook.
    fn load(&self, document: &str) -> Result<Box<dyn Workbook>, TraitError>;
}
