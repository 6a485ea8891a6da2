//! Resolve command.

use clap::Args;

use prodcfg_engine::{ProductConfigurator, ResolveMode};

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::output::{print_configured, print_info};

/// Arguments for the resolve command.
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Product name
    pub product: String,

    /// Configuration path, e.g. M/white/10 [default: the product defaults]
    pub path: Option<String>,

    /// Fail unless the path is valid exactly as written
    #[arg(short, long)]
    pub strict: bool,
}

/// Executes the resolve command.
pub fn execute(
    args: ResolveArgs,
    engine: &ProductConfigurator,
    format: OutputFormat,
    quiet: bool,
) -> anyhow::Result<()> {
    let mode = ResolveMode::from_strict(args.strict);
    let configured = engine
        .try_configure(&args.product, args.path.as_deref(), mode)
        .map_err(|e| CliError::NotConfigured {
            product: args.product.clone(),
            reason: e.to_string(),
        })?;

    if !quiet && format == OutputFormat::Table {
        if let Some(path) = args.path.as_deref() {
            if path != configured.product.config_path {
                print_info(&format!(
                    "'{path}' adjusted to '{}'",
                    configured.product.config_path
                ));
            }
        }
    }

    print_configured(&configured, format)
}
