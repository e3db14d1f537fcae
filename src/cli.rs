use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Köppen-Geiger climate classification of gridded model output.
#[derive(Parser)]
#[command(
    name = "koppen",
    version,
    about = "Calendar-aware climatologies and Köppen-Geiger classification"
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
    /// Compute climatologies and classify every grid cell.
    Classify(ClassifyArgs),
    /// Print the class table (codes, labels, colours).
    Legend(LegendArgs),
}

/// Arguments for the `classify` subcommand.
#[derive(clap::Args)]
pub struct ClassifyArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "koppen.toml")]
    pub config: PathBuf,

    /// Override the temperature field document from config.
    #[arg(long)]
    pub tas: Option<PathBuf>,

    /// Override the precipitation field document from config.
    #[arg(long)]
    pub pr: Option<PathBuf>,

    /// Override output JSON path from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override first year of the analysis period.
    #[arg(long)]
    pub start_year: Option<i32>,

    /// Override last year of the analysis period.
    #[arg(long)]
    pub end_year: Option<i32>,

    /// Override conventions from config (repeatable).
    #[arg(long = "convention")]
    pub conventions: Vec<String>,
}

/// Arguments for the `legend` subcommand.
#[derive(clap::Args)]
pub struct LegendArgs {
    /// Write the table as JSON to this path instead of printing it.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
