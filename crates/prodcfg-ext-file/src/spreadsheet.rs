//! Spreadsheet engines.
//!
//! - [`JsonSpreadsheetEngine`]: reads workbook documents from a directory on
//!   every load
//! - [`MemorySpreadsheetEngine`]: hands out clones of registered workbooks

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use dashmap::DashMap;
use serde::Deserialize;
use tracing::debug;

use prodcfg_core::CellValue;
use prodcfg_traits::error::TraitError;
use prodcfg_traits::spreadsheet::{SpreadsheetEngine, Workbook};

use crate::formulas::{FormulaArg, FormulaRegistry};
use crate::workbook::MemoryWorkbook;

// =============================================================================
// JSON SPREADSHEET ENGINE
// =============================================================================

/// Workbook document on disk.
#[derive(Debug, Deserialize)]
struct WorkbookDocument {
    sheets: Vec<SheetDocument>,
}

#[derive(Debug, Deserialize)]
struct SheetDocument {
    name: String,
    #[serde(default)]
    cells: BTreeMap<String, CellDocument>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CellDocument {
    Formula {
        formula: String,
        #[serde(default)]
        args: Vec<FormulaArg>,
    },
    Value(CellValue),
}

/// Spreadsheet engine reading JSON workbook documents.
///
/// Documents are parsed on every [`load`](SpreadsheetEngine::load); nothing is
/// cached between calls. Formulas naming an unregistered function evaluate to
/// a `#NAME?` error cell.
#[derive(Debug)]
pub struct JsonSpreadsheetEngine {
    dir: PathBuf,
    formulas: FormulaRegistry,
}

impl JsonSpreadsheetEngine {
    /// Create an engine over a directory, with the built-in formulas.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            formulas: FormulaRegistry::with_builtins(),
        }
    }

    /// Replace the formula registry.
    #[must_use]
    pub fn with_formulas(mut self, formulas: FormulaRegistry) -> Self {
        self.formulas = formulas;
        self
    }

    fn build(&self, document: WorkbookDocument) -> Result<MemoryWorkbook, TraitError> {
        let mut workbook = MemoryWorkbook::new();

        for sheet in document.sheets {
            workbook.add_sheet(&sheet.name);

            for (cell, spec) in sheet.cells {
                match spec {
                    CellDocument::Value(value) => {
                        workbook.set(&sheet.name, &cell, value)?;
                    }
                    CellDocument::Formula { formula, args } => match self.formulas.get(&formula) {
                        Some(named) => {
                            workbook.define(&sheet.name, &cell, move |ctx| {
                                (named.as_ref())(ctx, &args)
                            })?;
                        }
                        None => {
                            let message = format!("#NAME? unknown formula '{formula}'");
                            workbook.define(&sheet.name, &cell, move |_| Err(message.clone()))?;
                        }
                    },
                }
            }
        }

        Ok(workbook)
    }
}

impl SpreadsheetEngine for JsonSpreadsheetEngine {
    fn load(&self, document: &str) -> Result<Box<dyn Workbook>, TraitError> {
        let path = resolve_document(&self.dir, document)?;
        if !path.exists() {
            return Err(TraitError::NotFound(format!("workbook {}", path.display())));
        }

        let content = std::fs::read_to_string(&path)?;
        let parsed: WorkbookDocument =
            serde_json::from_str(&content).map_err(|e| TraitError::ParseError(e.to_string()))?;

        let workbook = self.build(parsed)?;
        debug!(
            "Loaded workbook {} ({} formulas)",
            path.display(),
            workbook.formula_count()
        );
        Ok(Box::new(workbook))
    }
}

/// Join a document name onto a directory, refusing anything that escapes it.
pub(crate) fn resolve_document(dir: &Path, document: &str) -> Result<PathBuf, TraitError> {
    let relative = Path::new(document);
    let escapes = document.is_empty()
        || relative.is_absolute()
        || relative
            .components()
            .any(|c| !matches!(c, std::path::Component::Normal(_)));

    if escapes {
        return Err(TraitError::InvalidInput(format!(
            "document name '{document}' must be a relative path inside the data directory"
        )));
    }
    Ok(dir.join(relative))
}

// =============================================================================
// IN-MEMORY SPREADSHEET ENGINE
// =============================================================================

/// Spreadsheet engine serving registered in-memory workbooks.
///
/// Every load returns a fresh clone of the registered template.
#[derive(Debug, Default)]
pub struct MemorySpreadsheetEngine {
    workbooks: DashMap<String, MemoryWorkbook>,
}

impl MemorySpreadsheetEngine {
    /// Create an engine with no workbooks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a workbook template under a document name.
    pub fn insert(&self, document: impl Into<String>, workbook: MemoryWorkbook) {
        self.workbooks.insert(document.into(), workbook);
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with_workbook(self, document: impl Into<String>, workbook: MemoryWorkbook) -> Self {
        self.insert(document, workbook);
        self
    }
}

impl SpreadsheetEngine for MemorySpreadsheetEngine {
    fn load(&self, document: &str) -> Result<Box<dyn Workbook>, TraitError> {
        self.workbooks
            .get(document)
            .map(|wb| Box::new(wb.value().clone()) as Box<dyn Workbook>)
            .ok_or_else(|| TraitError::NotFound(format!("workbook {document}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prodcfg_core::CellRef;
    use prodcfg_traits::spreadsheet::RecalcOptions;
    use rust_decimal_macros::dec;

    const DOC: &str = r#"{
        "sheets": [
            { "name": "Config", "cells": {
                "B2": "M",
                "E4": 500,
                "C3": { "formula": "equals", "args": ["B2", "L"] },
                "D3": { "formula": "no_such_function" }
            }},
            { "name": "Other" }
        ]
    }"#;

    fn cell(s: &str) -> CellRef {
        CellRef::parse(s).unwrap()
    }

    #[test]
    fn test_load_json_document() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("tshirt.json"), DOC).unwrap();

        let engine = JsonSpreadsheetEngine::new(dir.path());
        let mut wb = engine.load("tshirt.json").unwrap();
        assert_eq!(wb.sheet_names(), vec!["Config".to_string(), "Other".to_string()]);
        assert_eq!(wb.get_cell("Config", &cell("E4")).unwrap(), CellValue::Number(dec!(500)));

        let report = wb.recalculate(RecalcOptions::default()).unwrap();
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].cell, cell("D3"));
        assert_eq!(wb.get_cell("Config", &cell("C3")).unwrap(), CellValue::Bool(false));

        wb.set_cell("Config", &cell("B2"), CellValue::text("L")).unwrap();
        wb.recalculate(RecalcOptions::default()).unwrap();
        assert_eq!(wb.get_cell("Config", &cell("C3")).unwrap(), CellValue::Bool(true));
    }

    #[test]
    fn test_custom_formulas() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("mug.json"),
            r#"{ "sheets": [{ "name": "Config", "cells": {
                "B2": 3,
                "C2": { "formula": "double", "args": ["B2"] },
                "D2": { "formula": "sum", "args": ["B2"] }
            }}]}"#,
        )
        .unwrap();

        let mut formulas = FormulaRegistry::new();
        formulas.register("double", |ctx, args| {
            let value = args[0].resolve(ctx);
            let number = value.as_decimal().ok_or("#VALUE!")?;
            Ok(CellValue::Number(number * dec!(2)))
        });
        let engine = JsonSpreadsheetEngine::new(dir.path()).with_formulas(formulas);

        let mut wb = engine.load("mug.json").unwrap();
        let report = wb.recalculate(RecalcOptions::default()).unwrap();
        assert_eq!(wb.get_cell("Config", &cell("C2")).unwrap(), CellValue::Number(dec!(6)));
        // Builtins are replaced, not merged.
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].cell, cell("D2"));
    }

    #[test]
    fn test_each_load_is_fresh() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("wb.json"), DOC).unwrap();
        let engine = JsonSpreadsheetEngine::new(dir.path());

        let mut first = engine.load("wb.json").unwrap();
        first.set_cell("Config", &cell("B2"), CellValue::text("S")).unwrap();

        let second = engine.load("wb.json").unwrap();
        assert_eq!(second.get_cell("Config", &cell("B2")).unwrap(), CellValue::text("M"));
    }

    #[test]
    fn test_missing_and_escaping_documents() {
        let dir = tempfile::tempdir().unwrap();
        let engine = JsonSpreadsheetEngine::new(dir.path());

        assert!(matches!(engine.load("missing.json"), Err(TraitError::NotFound(_))));
        assert!(matches!(engine.load("../etc/passwd"), Err(TraitError::InvalidInput(_))));
        assert!(matches!(engine.load("/etc/passwd"), Err(TraitError::InvalidInput(_))));
    }

    #[test]
    fn test_memory_engine_hands_out_clones() {
        let mut template = MemoryWorkbook::new();
        template.set("S", "A1", dec!(1)).unwrap();
        let engine = MemorySpreadsheetEngine::new().with_workbook("doc", template);

        let mut wb = engine.load("doc").unwrap();
        wb.set_cell("S", &cell("A1"), CellValue::Number(dec!(2))).unwrap();

        let again = engine.load("doc").unwrap();
        assert_eq!(again.get_cell("S", &cell("A1")).unwrap(), CellValue::Number(dec!(1)));
        assert!(engine.load("other").is_err());
    }
}
