//! Command-line interface

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// POST migrated records to a remote HTTP endpoint
#[derive(Debug, Parser)]
#[command(name = "migrate-remote", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Validate a migration's destination settings and show its schemas
    Check(DestinationArgs),
    /// Import records from a JSON Lines file
    Import(ImportCommands),
}

/// Selects one migration's destination settings
#[derive(Debug, clap::Args)]
pub struct DestinationArgs {
    /// Destination settings file (TOML)
    #[arg(short, long, default_value = "migrate-remote.toml")]
    pub config: PathBuf,

    /// Migration id whose destination settings are used
    #[arg(short, long)]
    pub migration: String,
}

#[derive(Debug, clap::Args)]
pub struct ImportCommands {
    #[command(flatten)]
    pub destination: DestinationArgs,

    /// Records to import, one JSON object per line ("-" for stdin)
    #[arg(short, long)]
    pub records: PathBuf,

    /// Stop at the first record that fails to import
    #[arg(long)]
    pub fail_fast: bool,

    /// Overall HTTP request timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}
