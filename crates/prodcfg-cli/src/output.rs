//! Output formatting utilities.

use colored::Colorize;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use prodcfg_core::{CellValue, ConfiguredProduct, ParameterDefinition, Source};
use rust_decimal::Decimal;
use prodcfg_engine::Configured;

use crate::cli::OutputFormat;

/// Prints rows in the requested format.
pub fn print_output<T: Serialize + Tabled>(data: &[T], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => print_table(data),
        OutputFormat::Json => print_json(data),
        OutputFormat::Minimal => {
            if let Some(first) = data.first() {
                println!("{}", serde_json::to_string(first)?);
            }
            Ok(())
        }
    }
}

/// Prints data as a formatted table.
pub fn print_table<T: Tabled>(data: &[T]) -> anyhow::Result<()> {
    if data.is_empty() {
        println!("No results.");
        return Ok(());
    }

    let table = Table::new(data)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string();

    println!("{}", table);
    Ok(())
}

/// Prints data as JSON.
pub fn print_json<T: Serialize + ?Sized>(data: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Prints a success message.
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Prints an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Prints a warning message.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}

/// Prints an info message.
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// Prints a section header.
pub fn print_header(title: &str) {
    println!("\n{}", title.bold().underline());
}

// =============================================================================
// ROWS
// =============================================================================

/// A key-value pair for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct KeyValue {
    /// The key.
    #[tabled(rename = "Field")]
    pub key: String,
    /// The value.
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    /// Creates a new key-value pair.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// One parameter of a configured product.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct ParameterRow {
    /// Parameter name.
    #[tabled(rename = "Parameter")]
    pub name: String,
    /// Parameter type.
    #[tabled(rename = "Type")]
    pub kind: String,
    /// Chosen value.
    #[tabled(rename = "Value")]
    pub value: String,
    /// Whether the parameter may be changed.
    #[tabled(rename = "Enabled")]
    pub enabled: String,
    /// Options or bounds.
    #[tabled(rename = "Choices")]
    pub choices: String,
}

impl From<&ParameterDefinition> for ParameterRow {
    fn from(param: &ParameterDefinition) -> Self {
        let (value, choices) = match param.numeric() {
            Some(spec) => {
                let choices = format!("{} .. {}", bound_text(&spec.min), bound_text(&spec.max));
                (spec.value.normalize().to_string(), choices)
            }
            None => {
                let value = param
                    .selected_option()
                    .map(|o| o.value.clone())
                    .unwrap_or_default();
                let choices = param
                    .options()
                    .iter()
                    .map(|o| {
                        if o.is_available() {
                            o.value.clone()
                        } else {
                            format!("({})", o.value)
                        }
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
                (value, choices)
            }
        };

        Self {
            name: param.name.clone(),
            kind: param.kind.type_name().to_string(),
            value,
            enabled: yes_no(param.is_available()).to_string(),
            choices,
        }
    }
}

/// One resolved price tier.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct PriceRow {
    /// Tier position.
    #[tabled(rename = "Tier")]
    pub tier: usize,
    /// Price identifier.
    #[tabled(rename = "Price ID")]
    pub id: String,
    /// Billed quantity.
    #[tabled(rename = "Qty")]
    pub qty: String,
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

fn bound_text(bound: &Option<Source<Decimal>>) -> String {
    match bound {
        Some(Source::Literal(value)) => value.normalize().to_string(),
        Some(Source::Cell(cell)) => cell.to_string(),
        None => "-".to_string(),
    }
}

fn cell_text(value: &CellValue) -> String {
    match value {
        CellValue::Empty => "-".to_string(),
        other => other.to_string(),
    }
}

// =============================================================================
// CONFIGURED PRODUCTS
// =============================================================================

/// Prints a configured product with its resolution report.
pub fn print_configured(configured: &Configured, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => print_json(configured),
        OutputFormat::Minimal => {
            println!("{}", configured.product.config_path);
            Ok(())
        }
        OutputFormat::Table => {
            let report = &configured.report;
            let mut summary = product_summary(&configured.product);
            summary.push(KeyValue::new("Passes", report.passes.to_string()));
            summary.push(KeyValue::new("Repaired", yes_no(report.repaired)));
            print_product_tables(&configured.product, &summary)?;

            for error in &report.formula_errors {
                print_warning(&format!("{}!{}: {}", error.sheet, error.cell, error.message));
            }
            Ok(())
        }
    }
}

/// Prints a configured product without diagnostics.
pub fn print_product(product: &ConfiguredProduct, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => print_json(product),
        OutputFormat::Minimal => {
            println!("{}", product.config_path);
            Ok(())
        }
        OutputFormat::Table => print_product_tables(product, &product_summary(product)),
    }
}

fn product_summary(product: &ConfiguredProduct) -> Vec<KeyValue> {
    let mut summary = vec![KeyValue::new("Product", product.name.clone())];
    if let Some(title) = product.attributes.get("title").and_then(|t| t.as_str()) {
        summary.push(KeyValue::new("Title", title));
    }
    summary.push(KeyValue::new("Config path", product.config_path.clone()));
    summary.push(KeyValue::new(
        "Quantity",
        product
            .quantity
            .map(|q| q.normalize().to_string())
            .unwrap_or_else(|| "-".to_string()),
    ));
    summary.push(KeyValue::new("Weight", cell_text(&product.weight)));
    summary
}

fn print_product_tables(product: &ConfiguredProduct, summary: &[KeyValue]) -> anyhow::Result<()> {
    print_table(summary)?;

    print_header("Parameters");
    let params: Vec<ParameterRow> = product.parameters.iter().map(ParameterRow::from).collect();
    print_table(&params)?;

    if !product.prices.is_empty() {
        print_header("Prices");
        let prices: Vec<PriceRow> = product
            .prices
            .iter()
            .enumerate()
            .map(|(i, p)| PriceRow {
                tier: i + 1,
                id: cell_text(&p.id),
                qty: cell_text(&p.qty),
            })
            .collect();
        print_table(&prices)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use prodcfg_core::{NumericParameter, SelectOption};

    #[test]
    fn test_select_row_marks_disabled_options() {
        let mut large = SelectOption::new("L");
        large.enabled = Some(false);
        let mut medium = SelectOption::new("M");
        medium.selected = true;
        let param =
            ParameterDefinition::select("size", vec![SelectOption::new("S"), medium, large]);

        let row = ParameterRow::from(&param);
        assert_eq!(row.kind, "select");
        assert_eq!(row.value, "M");
        assert_eq!(row.choices, "S, M, (L)");
        assert_eq!(row.enabled, "yes");
    }

    #[test]
    fn test_numeric_row_shows_bounds() {
        let spec = NumericParameter {
            min: Some(Source::Literal(Decimal::ONE)),
            max: None,
            value: Decimal::from(12),
        };
        let row = ParameterRow::from(&ParameterDefinition::quantity("qty", spec));
        assert_eq!(row.value, "12");
        assert_eq!(row.choices, "1 .. -");
    }
}
