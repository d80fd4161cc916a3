//! Config command implementation

use std::path::Path;

use anyhow::Result;
use tally_core::config::default_config_path;

use super::load_analyzer;

/// Print the effective analyzer config as TOML
pub fn cmd_config(config_path: Option<&Path>) -> Result<()> {
    let analyzer = load_analyzer(config_path)?;

    match (config_path, default_config_path()) {
        (Some(path), _) => println!("# Requested: {}", path.display()),
        (None, Some(path)) if path.exists() => println!("# Loaded from: {}", path.display()),
        (None, Some(path)) => println!("# Built-in defaults (override at {})", path.display()),
        (None, None) => println!("# Built-in defaults"),
    }
    print!("{}", analyzer.config().to_toml()?);
    Ok(())
}
