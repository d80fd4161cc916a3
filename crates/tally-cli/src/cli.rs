//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tally_core::InputFormat;

/// Tally - Spending suggestions and insights from expense records
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Rule-based expense analyzer", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Analyzer config file (TOML)
    ///
    /// Falls back to the user config directory, then the built-in defaults.
    #[arg(long, env = "TALLY_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a batch of expenses
    Analyze {
        /// JSON or CSV file with expenses
        #[arg(short, long)]
        file: PathBuf,

        /// Input format (detected from the extension if not specified)
        #[arg(long)]
        format: Option<InputFormat>,

        /// Print the raw JSON report
        #[arg(long)]
        json: bool,
    },

    /// Summarize spending over a window of days
    Insights {
        /// JSON or CSV file with expenses
        #[arg(short, long)]
        file: PathBuf,

        /// Window length in days (defaults to the file's `days`, then 30)
        #[arg(short, long)]
        days: Option<f64>,

        /// Input format (detected from the extension if not specified)
        #[arg(long)]
        format: Option<InputFormat>,

        /// Print the raw JSON insights
        #[arg(long)]
        json: bool,
    },

    /// Start the HTTP service
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PORT", default_value = "5001")]
        port: u16,

        /// Host to bind to
        #[arg(long, env = "HOST", default_value = "0.0.0.0")]
        host: String,
    },

    /// Print the effective analyzer configuration as TOML
    Config,
}
