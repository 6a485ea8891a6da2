//! Prodcfg CLI - Command-line interface for product configuration.
//!
//! # Usage
//!
//! ```bash
//! # List registered products
//! prodcfg list
//!
//! # Resolve a configuration path, adjusting it where needed
//! prodcfg resolve tshirt L/red/5
//!
//! # Fail unless the path is valid as written
//! prodcfg resolve tshirt M/white/10 --strict --format json
//!
//! # Check a path and get the nearest valid one
//! prodcfg check poster A3/oak
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod config;
mod error;
mod output;

use cli::{Cli, Commands};
use config::CliConfig;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    if let Err(e) = run(cli) {
        output::print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = CliConfig::load(cli.config.as_deref())?;
    if let Some(data_dir) = cli.data_dir {
        config = config.with_data_dir(data_dir);
    }

    let engine = commands::build_engine(&config)?;

    // Set up output format
    let format = cli.format;
    let quiet = cli.quiet;

    // Execute command
    match cli.command {
        Commands::Resolve(args) => commands::resolve::execute(args, &engine, format, quiet)?,
        Commands::Check(args) => commands::check::execute(args, &engine, format, quiet)?,
        Commands::Defaults(args) => commands::defaults::execute(args, &engine, format)?,
        Commands::List(args) => commands::list::execute(args, &engine, format, quiet)?,
    }

    Ok(())
}

/// Logs go to stderr so JSON on stdout stays parseable.
fn init_tracing(verbose: bool, quiet: bool) {
    let default = if verbose {
        "prodcfg=debug,prodcfg_engine=debug,prodcfg_ext_file=debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
