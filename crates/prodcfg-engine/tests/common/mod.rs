//! Shared fixtures: three products over in-memory workbooks.
//!
//! - `tshirt`: one select, `L` permanently out of stock
//! - `banner`: material, width bounded by a formula cell, quantity, cell weight
//! - `hoodie`: size, a color that is disabled for `S`, bounded quantity

#![allow(dead_code)]

use std::sync::Arc;

use prodcfg_core::{CellValue, ProductDefinition};
use prodcfg_engine::{ProductConfigurator, ProductConfiguratorBuilder};
use prodcfg_ext_file::{InMemoryCatalog, InMemoryRegistry, MemorySpreadsheetEngine, MemoryWorkbook};
use rust_decimal_macros::dec;
use serde_json::json;

pub const SHEET: &str = "Sheet1";

pub fn tshirt() -> ProductDefinition {
    serde_json::from_value(json!({
        "name": "tshirt",
        "title": "Classic T-Shirt",
        "parameters": [
            { "name": "size", "type": "select", "cell": "B2", "options": [
                { "value": "S" },
                { "value": "M" },
                { "value": "L", "enabledCell": "C3" }
            ]}
        ],
        "weight": 0.2,
        "prices": [{ "id": 101, "qty": 1 }],
        "xcalc": { "document": "tshirt" }
    }))
    .unwrap()
}

pub fn tshirt_workbook() -> MemoryWorkbook {
    let mut wb = MemoryWorkbook::new();
    wb.set(SHEET, "B2", "S").unwrap();
    wb.set(SHEET, "C3", false).unwrap();
    wb
}

pub fn banner() -> ProductDefinition {
    serde_json::from_value(json!({
        "name": "banner",
        "parameters": [
            { "name": "material", "type": "select", "cell": "B2", "options": [
                { "value": "vinyl" }, { "value": "mesh" }
            ]},
            { "name": "width", "type": "number", "cell": "B3", "min": 1, "max": "E4", "value": 100 },
            { "name": "qty", "type": "quantity", "cell": "B4", "min": 1, "max": 1000, "value": 1 }
        ],
        "weight": "F1",
        "prices": [
            { "id": 501, "qty": "F2" },
            { "id": "F3", "qty": 10 }
        ],
        "xcalc": { "document": "banner", "sheet": "Calc" }
    }))
    .unwrap()
}

pub fn banner_workbook() -> MemoryWorkbook {
    let mut wb = MemoryWorkbook::new();
    wb.add_sheet("Notes");
    wb.set("Calc", "F3", dec!(77)).unwrap();
    // Mesh is only made up to 300 wide.
    wb.define("Calc", "E4", |ctx| {
        let mesh = ctx.value("B2") == CellValue::text("mesh");
        Ok(CellValue::Number(if mesh { dec!(300) } else { dec!(500) }))
    })
    .unwrap();
    wb.define("Calc", "F1", |ctx| {
        Ok(CellValue::Number(ctx.number("B3")? * ctx.number("B4")? * dec!(0.01)))
    })
    .unwrap();
    wb.define("Calc", "F2", |ctx| Ok(CellValue::Number(ctx.number("B4")? * dec!(12))))
        .unwrap();
    wb
}

pub fn hoodie() -> ProductDefinition {
    serde_json::from_value(json!({
        "name": "hoodie",
        "parameters": [
            { "name": "size", "type": "select", "cell": "B2", "options": [
                { "value": "S" }, { "value": "M" }, { "value": "L", "enabledCell": "C2" }
            ]},
            { "name": "color", "type": "select", "cell": "B3", "enabledCell": "D2", "options": [
                { "value": "white" },
                { "value": "black" },
                { "value": "none", "isFallback": true, "enabledCell": "D3" }
            ]},
            { "name": "qty", "type": "quantity", "cell": "B4", "min": 1, "max": "E4", "value": 1 }
        ],
        "weight": 0.6,
        "prices": [{ "id": 301, "qty": 1 }],
        "xcalc": { "document": "hoodie" }
    }))
    .unwrap()
}

pub fn hoodie_workbook() -> MemoryWorkbook {
    let mut wb = MemoryWorkbook::new();
    wb.set(SHEET, "E4", dec!(500)).unwrap();
    // L only comes in black.
    wb.define(SHEET, "C2", |ctx| {
        Ok(CellValue::Bool(ctx.value("B3") == CellValue::text("black")))
    })
    .unwrap();
    // Small hoodies are undyed.
    wb.define(SHEET, "D2", |ctx| Ok(CellValue::Bool(ctx.value("B2") != CellValue::text("S"))))
        .unwrap();
    wb.define(SHEET, "D3", |ctx| Ok(CellValue::Bool(ctx.value("B2") == CellValue::text("S"))))
        .unwrap();
    wb
}

/// Catalog holding every fixture template.
pub fn catalog() -> InMemoryCatalog {
    InMemoryCatalog::new()
        .with_definition(tshirt())
        .and_then(|c| c.with_definition(banner()))
        .and_then(|c| c.with_definition(hoodie()))
        .unwrap()
}

/// Configurator over the given catalog, plus a disabled `mug`.
pub fn configurator_over(catalog: Arc<InMemoryCatalog>) -> ProductConfigurator {
    let registry = InMemoryRegistry::new()
        .with_product("tshirt", true)
        .with_product("banner", true)
        .with_product("hoodie", true)
        .with_product("mug", false);

    let spreadsheets = MemorySpreadsheetEngine::new()
        .with_workbook("tshirt", tshirt_workbook())
        .with_workbook("banner", banner_workbook())
        .with_workbook("hoodie", hoodie_workbook());

    ProductConfiguratorBuilder::new()
        .with_registry(Arc::new(registry))
        .with_catalog(catalog)
        .with_spreadsheets(Arc::new(spreadsheets))
        .build()
        .unwrap()
}

/// Configurator serving every fixture, plus a disabled `mug`.
pub fn configurator() -> ProductConfigurator {
    configurator_over(Arc::new(catalog()))
}

/// Configurator serving one enabled product over one workbook.
pub fn single_product(definition: ProductDefinition, workbook: MemoryWorkbook) -> ProductConfigurator {
    let name = definition.name.clone();
    let document = definition.workbook.document.clone();

    ProductConfiguratorBuilder::new()
        .with_registry(Arc::new(InMemoryRegistry::new().with_product(&name, true)))
        .with_catalog(Arc::new(InMemoryCatalog::new().with_definition(definition).unwrap()))
        .with_spreadsheets(Arc::new(
            MemorySpreadsheetEngine::new().with_workbook(document, workbook),
        ))
        .build()
        .unwrap()
}
