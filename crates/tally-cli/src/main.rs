//! Tally CLI - Expense analyzer
//!
//! Usage:
//!   tally analyze --file expenses.json     Suggestions and analysis for a batch
//!   tally insights --file expenses.csv     Totals and breakdowns over a window
//!   tally serve --port 5001                Start the HTTP service
//!   tally config                           Print the effective analyzer config

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Analyze { file, format, json } => {
            commands::cmd_analyze(config_path, &file, format, json)
        }
        Commands::Insights {
            file,
            days,
            format,
            json,
        } => commands::cmd_insights(config_path, &file, days, format, json),
        Commands::Serve { port, host } => commands::cmd_serve(config_path, &host, port).await,
        Commands::Config => commands::cmd_config(config_path),
    }
}
