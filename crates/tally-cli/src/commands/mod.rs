//! CLI command implementations
//!
//! - `analyze` - Suggestions and detailed analysis for a batch file
//! - `insights` - Totals and breakdowns over a window of days
//! - `serve` - Web server command
//! - `config` - Effective analyzer configuration

pub mod analyze;
pub mod config;
pub mod insights;
pub mod serve;

// Re-export command functions for main.rs
pub use analyze::*;
pub use config::*;
pub use insights::*;
pub use serve::*;

use std::path::Path;

use anyhow::{Context, Result};
use tally_core::{AnalyzerConfig, ExpenseAnalyzer};

/// Build an analyzer from the configured (or default) settings
pub fn load_analyzer(config_path: Option<&Path>) -> Result<ExpenseAnalyzer> {
    let config = AnalyzerConfig::load(config_path).context("Failed to load analyzer config")?;
    Ok(ExpenseAnalyzer::with_config(config))
}

/// Truncate a string to max length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
