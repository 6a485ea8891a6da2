//! In-memory workbook.
//!
//! Cells hold plain values; formula cells hold Rust closures that read other
//! cells through a [`FormulaContext`]. Recalculation sweeps the formulas until
//! no value changes, so declaration order does not matter for acyclic sheets.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use rust_decimal::Decimal;

use prodcfg_core::{CellRef, CellValue};
use prodcfg_traits::error::TraitError;
use prodcfg_traits::spreadsheet::{FormulaError, RecalcOptions, RecalcReport, Workbook};

/// A formula: computes a cell value from the rest of the workbook.
pub type FormulaFn = Arc<dyn Fn(&FormulaContext<'_>) -> Result<CellValue, String> + Send + Sync>;

/// Read access to the workbook while a formula evaluates.
pub struct FormulaContext<'a> {
    sheets: &'a [Sheet],
    sheet: &'a str,
}

impl FormulaContext<'_> {
    /// Value of a cell on the formula's own sheet. Bad references read as errors.
    pub fn value(&self, cell: &str) -> CellValue {
        match CellRef::parse(cell) {
            Ok(cell) => self.value_at(&cell),
            Err(e) => CellValue::error(e.to_string()),
        }
    }

    /// Value of a cell on the formula's own sheet.
    pub fn value_at(&self, cell: &CellRef) -> CellValue {
        self.sheet_value(self.sheet, cell)
    }

    /// Value of a cell on any sheet.
    pub fn sheet_value(&self, sheet: &str, cell: &CellRef) -> CellValue {
        self.sheets
            .iter()
            .find(|s| s.name == sheet)
            .and_then(|s| s.cells.get(cell))
            .cloned()
            .unwrap_or_default()
    }

    /// Numeric value of a cell, or an error message.
    pub fn number(&self, cell: &str) -> Result<Decimal, String> {
        let value = self.value(cell);
        value
            .as_decimal()
            .ok_or_else(|| format!("#VALUE! {cell} is not numeric ({value})"))
    }

    /// Whether a cell reads as an enabled flag.
    pub fn flag(&self, cell: &str) -> bool {
        self.value(cell).is_enabled_flag()
    }
}

#[derive(Debug, Clone)]
struct Sheet {
    name: String,
    cells: BTreeMap<CellRef, CellValue>,
}

#[derive(Clone)]
struct FormulaCell {
    sheet: String,
    cell: CellRef,
    formula: FormulaFn,
}

/// A workbook held entirely in memory.
#[derive(Clone, Default)]
pub struct MemoryWorkbook {
    sheets: Vec<Sheet>,
    formulas: Vec<FormulaCell>,
}

impl MemoryWorkbook {
    /// Create an empty workbook.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sheet if it does not exist yet.
    pub fn add_sheet(&mut self, name: &str) -> &mut Self {
        if !self.sheets.iter().any(|s| s.name == name) {
            self.sheets.push(Sheet {
                name: name.to_string(),
                cells: BTreeMap::new(),
            });
        }
        self
    }

    /// Store a value, creating the sheet if needed.
    pub fn set(
        &mut self,
        sheet: &str,
        cell: &str,
        value: impl Into<CellValue>,
    ) -> Result<&mut Self, TraitError> {
        let cell = CellRef::parse(cell)?;
        self.add_sheet(sheet);
        self.sheet_mut(sheet)?.cells.insert(cell, value.into());
        Ok(self)
    }

    /// Attach a formula to a cell, creating the sheet if needed.
    pub fn define<F>(&mut self, sheet: &str, cell: &str, formula: F) -> Result<&mut Self, TraitError>
    where
        F: Fn(&FormulaContext<'_>) -> Result<CellValue, String> + Send + Sync + 'static,
    {
        self.define_arc(sheet, cell, Arc::new(formula))
    }

    /// Attach an already shared formula to a cell.
    pub fn define_arc(
        &mut self,
        sheet: &str,
        cell: &str,
        formula: FormulaFn,
    ) -> Result<&mut Self, TraitError> {
        let cell = CellRef::parse(cell)?;
        self.add_sheet(sheet);
        self.formulas.retain(|f| !(f.sheet == sheet && f.cell == cell));
        self.formulas.push(FormulaCell {
            sheet: sheet.to_string(),
            cell,
            formula,
        });
        Ok(self)
    }

    /// Number of formula cells.
    pub fn formula_count(&self) -> usize {
        self.formulas.len()
    }

    fn sheet(&self, name: &str) -> Result<&Sheet, TraitError> {
        self.sheets
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| TraitError::UnknownSheet(name.to_string()))
    }

    fn sheet_mut(&mut self, name: &str) -> Result<&mut Sheet, TraitError> {
        self.sheets
            .iter_mut()
            .find(|s| s.name == name)
            .ok_or_else(|| TraitError::UnknownSheet(name.to_string()))
    }

    /// Evaluate every formula once. Returns whether any value changed.
    fn sweep(&mut self, options: RecalcOptions, report: &mut RecalcReport) -> Result<bool, TraitError> {
        let mut changed = false;
        report.evaluated = 0;
        report.errors.clear();

        for index in 0..self.formulas.len() {
            let FormulaCell {
                sheet,
                cell,
                formula,
            } = self.formulas[index].clone();

            let result = {
                let ctx = FormulaContext {
                    sheets: &self.sheets,
                    sheet: &sheet,
                };
                (formula.as_ref())(&ctx)
            };
            report.evaluated += 1;

            let value = match result {
                Ok(value) => value,
                Err(message) if options.continue_on_error => {
                    report.errors.push(FormulaError {
                        sheet: sheet.clone(),
                        cell: cell.clone(),
                        message: message.clone(),
                    });
                    CellValue::error(message)
                }
                Err(message) => {
                    return Err(TraitError::Formula {
                        sheet,
                        cell: cell.to_string(),
                        message,
                    })
                }
            };

            let cells = &mut self.sheet_mut(&sheet)?.cells;
            if cells.get(&cell) != Some(&value) {
                cells.insert(cell, value);
                changed = true;
            }
        }

        Ok(changed)
    }
}

impl fmt::Debug for MemoryWorkbook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryWorkbook")
            .field("sheets", &self.sheets)
            .field("formulas", &self.formulas.len())
            .finish()
    }
}

impl Workbook for MemoryWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|s| s.name.clone()).collect()
    }

    fn get_cell(&self, sheet: &str, cell: &CellRef) -> Result<CellValue, TraitError> {
        Ok(self.sheet(sheet)?.cells.get(cell).cloned().unwrap_or_default())
    }

    fn set_cell(&mut self, sheet: &str, cell: &CellRef, value: CellValue) -> Result<(), TraitError> {
        self.sheet_mut(sheet)?.cells.insert(cell.clone(), value);
        Ok(())
    }

    fn recalculate(&mut self, options: RecalcOptions) -> Result<RecalcReport, TraitError> {
        let mut report = RecalcReport::default();

        // An acyclic sheet settles within one sweep per formula.
        let max_sweeps = self.formulas.len() + 1;
        for _ in 0..max_sweeps {
            if !self.sweep(options, &mut report)? {
                break;
            }
        }

        Ok(report)
    }
}
