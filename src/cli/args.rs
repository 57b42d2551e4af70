use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ordered_fanout")]
#[command(about = "Dispatch work items concurrently and report results in submission order")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the simulated requests and print live and ordered results
    Run(RunArgs),

    /// Print the effective configuration as JSON
    ShowConfig {
        /// Configuration file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Targets to dispatch (defaults to the configured or built-in endpoints)
    pub targets: Vec<String>,

    /// Configuration file (JSON)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of synthetic targets when no targets are given
    #[arg(short = 'n', long)]
    pub count: Option<usize>,

    /// Upper bound of the simulated delay in milliseconds
    #[arg(long)]
    pub max_delay_ms: Option<u64>,

    /// Probability of a simulated failure (0.0 - 1.0)
    #[arg(long)]
    pub failure_rate: Option<f64>,

    /// Seed for reproducible delays and failures
    #[arg(long)]
    pub seed: Option<u64>,

    /// Maximum number of executors running at once
    #[arg(short = 'j', long)]
    pub max_concurrent: Option<usize>,

    /// Cancel outstanding work after this many milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Write the final report as JSON to this file
    #[arg(short = 'o', long)]
    pub json_output: Option<PathBuf>,

    /// Force overwrite existing JSON output file without warning
    #[arg(short, long)]
    pub force: bool,

    /// Suppress the live arrival view
    #[arg(short, long)]
    pub quiet: bool,
}
