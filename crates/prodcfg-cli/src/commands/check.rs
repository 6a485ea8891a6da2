//! Check command.

use clap::Args;
use serde::Serialize;

use prodcfg_engine::{ProductConfigurator, ResolveMode};

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::output::{print_json, print_success, print_warning};

/// Arguments for the check command.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Product name
    pub product: String,

    /// Configuration path to check
    pub path: String,
}

/// Outcome of a check.
#[derive(Debug, Serialize)]
struct CheckOutcome {
    product: String,
    path: String,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    suggestion: Option<String>,
}

/// Executes the check command.
///
/// Exits with an error when the path is not valid as written, after
/// suggesting the nearest configuration a lenient resolve would give.
pub fn execute(
    args: CheckArgs,
    engine: &ProductConfigurator,
    format: OutputFormat,
    quiet: bool,
) -> anyhow::Result<()> {
    let strict = engine.try_configure(&args.product, Some(&args.path), ResolveMode::Strict);

    let outcome = match strict {
        Ok(_) => CheckOutcome {
            product: args.product.clone(),
            path: args.path.clone(),
            valid: true,
            reason: None,
            suggestion: None,
        },
        Err(e) => CheckOutcome {
            product: args.product.clone(),
            path: args.path.clone(),
            valid: false,
            reason: Some(e.to_string()),
            suggestion: engine
                .configure(&args.product, Some(&args.path), ResolveMode::Lenient)
                .map(|p| p.config_path),
        },
    };

    match format {
        OutputFormat::Json => print_json(&outcome)?,
        OutputFormat::Minimal => println!("{}", outcome.valid),
        OutputFormat::Table => {
            if outcome.valid {
                if !quiet {
                    print_success(&format!(
                        "'{}' is a valid configuration of '{}'",
                        outcome.path, outcome.product
                    ));
                }
            } else {
                if let Some(reason) = &outcome.reason {
                    print_warning(reason);
                }
                if let Some(suggestion) = &outcome.suggestion {
                    print_warning(&format!("nearest valid configuration: '{suggestion}'"));
                }
            }
        }
    }

    if outcome.valid {
        Ok(())
    } else {
        Err(CliError::InvalidPath {
            product: outcome.product,
            path: outcome.path,
        }
        .into())
    }
}
