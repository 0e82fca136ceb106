use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Flux series reconciliation.
#[derive(Parser)]
#[command(
    name = "fluxrec",
    version,
    about = "Reconcile, aggregate and combine greenhouse-gas flux time series"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Run the reconciliation pipeline and export the tables.
    Run(RunArgs),
    /// Print the built-in union table.
    Groups,
}

/// Arguments for the `run` subcommand.
#[derive(clap::Args)]
pub struct RunArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "fluxrec.toml")]
    pub config: PathBuf,

    /// Override output JSON path from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
