//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{CheckArgs, DefaultsArgs, ListArgs, ResolveArgs};

/// Prodcfg - Spreadsheet-driven product configuration CLI
#[derive(Parser)]
#[command(name = "prodcfg")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file [default: config/prodcfg.toml when present]
    #[arg(short, long, global = true, env = "PRODCFG_CONFIG")]
    pub config: Option<PathBuf>,

    /// Data directory holding registry.json, products/ and workbooks/
    #[arg(short, long, global = true, env = "PRODCFG_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a configuration path into a configured product
    Resolve(ResolveArgs),

    /// Check whether a configuration path is valid exactly as written
    Check(CheckArgs),

    /// Show the default configuration of a product
    Defaults(DefaultsArgs),

    /// List registered products
    List(ListArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// Configuration path only
    Minimal,
}
