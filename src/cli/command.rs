//! Command-line interface definitions.
//!
//! The CLI runs the arbitrage simulation in the foreground, serves the HTTP
//! API, evaluates one-off price snapshots and inspects the opportunity log.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Stock dashboard backend and arbitrage simulator
#[derive(Parser, Debug)]
#[command(name = "pixel-trader")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file (defaults are used if it does not exist)
    #[arg(short, long, global = true, default_value = "config.toml")]
    pub config: PathBuf,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the arbitrage simulation in the foreground
    Run(RunArgs),

    /// Serve the HTTP API
    Serve(ServeArgs),

    /// Evaluate two price snapshots once
    Detect(DetectArgs),

    /// Inspect the opportunity log
    #[command(subcommand)]
    Log(LogCommand),

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),
}

/// Shared logging overrides.
#[derive(Parser, Debug, Default)]
pub struct LogArgs {
    /// Override log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Use JSON log format instead of pretty
    #[arg(long)]
    pub json_logs: bool,
}

/// Arguments for `run`.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Stop after this many tick pairs
    #[arg(long)]
    pub ticks: Option<u64>,

    /// Override the divergence threshold (fraction, e.g. 0.005)
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Override the opportunity log path
    #[arg(long)]
    pub log_path: Option<PathBuf>,

    /// Seed both random walks for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,

    #[command(flatten)]
    pub logging: LogArgs,
}

/// Arguments for `serve`.
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Override bind host
    #[arg(long)]
    pub host: Option<String>,

    /// Override bind port
    #[arg(long)]
    pub port: Option<u16>,

    /// Start the simulation as soon as the server is up
    #[arg(long)]
    pub autostart: bool,

    #[command(flatten)]
    pub logging: LogArgs,
}

/// Arguments for `detect`.
#[derive(Parser, Debug)]
pub struct DetectArgs {
    /// Prices from the first source as TICKER=PRICE
    #[arg(long = "first", num_args = 1.., required = true)]
    pub first: Vec<String>,

    /// Prices from the second source as TICKER=PRICE
    #[arg(long = "second", num_args = 1.., required = true)]
    pub second: Vec<String>,

    /// Divergence threshold (fraction); defaults to the configured one
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Append detected opportunities to the configured log
    #[arg(long)]
    pub record: bool,
}

/// Subcommands for `log`.
#[derive(Subcommand, Debug)]
pub enum LogCommand {
    /// Show the most recent opportunities
    Show(LogShowArgs),
    /// Summarize the log per ticker and per hour
    Summary,
    /// Write the log to a file as a JSON array
    Export(LogExportArgs),
    /// Delete every recorded opportunity
    Clear(LogClearArgs),
}

/// Arguments for `log show`.
#[derive(Parser, Debug)]
pub struct LogShowArgs {
    /// Number of records to show
    #[arg(short = 'n', long, default_value = "20")]
    pub limit: usize,

    /// Only show this ticker
    #[arg(long)]
    pub ticker: Option<String>,
}

/// Arguments for `log export`.
#[derive(Parser, Debug)]
pub struct LogExportArgs {
    /// Destination file
    pub output: PathBuf,
}

/// Arguments for `log clear`.
#[derive(Parser, Debug)]
pub struct LogClearArgs {
    /// Skip confirmation
    #[arg(long)]
    pub yes: bool,
}

/// Subcommands for `check`.
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Validate the configuration file
    Config,
}
