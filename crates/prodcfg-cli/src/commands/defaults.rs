//! Defaults command.

use clap::Args;

use prodcfg_engine::ProductConfigurator;

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::output::print_product;

/// Arguments for the defaults command.
#[derive(Args, Debug)]
pub struct DefaultsArgs {
    /// Product name
    pub product: String,
}

/// Executes the defaults command.
pub fn execute(
    args: DefaultsArgs,
    engine: &ProductConfigurator,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let product = engine
        .defaults(&args.product)
        .ok_or_else(|| CliError::NotConfigured {
            product: args.product.clone(),
            reason: "no default configuration (unknown, disabled or broken product)".into(),
        })?;

    print_product(&product, format)
}
