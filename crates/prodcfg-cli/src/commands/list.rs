//! List command.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use prodcfg_engine::ProductConfigurator;

use crate::cli::OutputFormat;
use crate::output::{print_info, print_output};

/// Arguments for the list command.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only show enabled products
    #[arg(short, long)]
    pub enabled: bool,
}

/// One registered product.
#[derive(Debug, Serialize, Tabled)]
struct ProductRow {
    #[tabled(rename = "Product")]
    name: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Enabled")]
    enabled: bool,
}

/// Executes the list command.
pub fn execute(
    args: ListArgs,
    engine: &ProductConfigurator,
    format: OutputFormat,
    quiet: bool,
) -> anyhow::Result<()> {
    let rows: Vec<ProductRow> = engine
        .products()?
        .into_iter()
        .filter(|entry| entry.enabled || !args.enabled)
        .map(|entry| ProductRow {
            title: entry.title.unwrap_or_default(),
            name: entry.name,
            enabled: entry.enabled,
        })
        .collect();

    print_output(&rows, format)?;

    if !quiet && format == OutputFormat::Table {
        let enabled = rows.iter().filter(|r| r.enabled).count();
        print_info(&format!("{} products, {} enabled", rows.len(), enabled));
    }
    Ok(())
}
