//! Analyzer configuration
//!
//! Thresholds and window sizes used by the analyzer. The configuration is an
//! immutable value owned by [`crate::ExpenseAnalyzer`], so a single instance
//! can be shared across threads without locking.
//!
//! ## Configuration Resolution
//!
//! 1. Explicit path (CLI `--config` or `TALLY_CONFIG`)
//! 2. Override in data dir (~/.local/share/tally/config/analyzer.toml)
//! 3. Embedded defaults (compiled into binary)

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/analyzer.toml");

/// Total-spending levels for the spending-level suggestion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpendingThresholds {
    /// Not consulted by any rule yet
    pub low: f64,
    pub medium: f64,
    pub high: f64,
}

impl Default for SpendingThresholds {
    fn default() -> Self {
        Self {
            low: 1000.0,
            medium: 5000.0,
            high: 10000.0,
        }
    }
}

/// Analyzer configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyzerConfig {
    pub thresholds: SpendingThresholds,
    /// Days the batch is assumed to span for the daily average
    pub window_days: u32,
    /// Days counted as the recent week for the trend suggestion
    pub recent_days: i64,
    /// Maximum suggestions returned
    pub max_suggestions: usize,
    /// Fewer suggestions than this triggers the generic tracking tip
    pub min_suggestions: usize,
    pub currency_symbol: String,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            thresholds: SpendingThresholds::default(),
            window_days: 30,
            recent_days: 7,
            max_suggestions: 5,
            min_suggestions: 3,
            currency_symbol: "₹".to_string(),
        }
    }
}

impl AnalyzerConfig {
    /// Load configuration (explicit path, then data dir override, then embedded)
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        let content = if let Some(path) = override_path {
            if path.exists() {
                debug!(path = %path.display(), "Loading analyzer config");
                fs::read_to_string(path)
                    .map_err(|e| Error::Config(format!("Failed to read config: {}", e)))?
            } else {
                warn!(path = %path.display(), "Config file not found, using defaults");
                DEFAULT_CONFIG.to_string()
            }
        } else {
            match default_config_path().filter(|p| p.exists()) {
                Some(default_path) => {
                    debug!(path = %default_path.display(), "Loading analyzer config override");
                    fs::read_to_string(&default_path)
                        .map_err(|e| Error::Config(format!("Failed to read config: {}", e)))?
                }
                None => DEFAULT_CONFIG.to_string(),
            }
        };

        Self::from_toml(&content)
    }

    /// Parse configuration from TOML content; missing keys keep their defaults
    pub fn from_toml(content: &str) -> Result<Self> {
        let raw: RawConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

        let mut config = Self::default();

        if let Some(symbol) = raw.currency_symbol {
            config.currency_symbol = symbol;
        }

        if let Some(thresholds) = raw.thresholds {
            if let Some(low) = thresholds.low {
                config.thresholds.low = low;
            }
            if let Some(medium) = thresholds.medium {
                config.thresholds.medium = medium;
            }
            if let Some(high) = thresholds.high {
                config.thresholds.high = high;
            }
        }

        if let Some(window) = raw.window {
            if let Some(days) = window.days {
                config.window_days = days;
            }
            if let Some(recent) = window.recent_days {
                config.recent_days = recent;
            }
        }

        if let Some(suggestions) = raw.suggestions {
            if let Some(max) = suggestions.max {
                config.max_suggestions = max;
            }
            if let Some(min) = suggestions.min {
                config.min_suggestions = min;
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the analyzer cannot work with
    pub fn validate(&self) -> Result<()> {
        let t = &self.thresholds;
        if !(t.low <= t.medium && t.medium <= t.high) {
            return Err(Error::Config(format!(
                "Thresholds must satisfy low <= medium <= high (got {} / {} / {})",
                t.low, t.medium, t.high
            )));
        }
        if self.window_days == 0 {
            return Err(Error::Config("window.days must be positive".into()));
        }
        if self.recent_days < 0 {
            return Err(Error::Config("window.recent_days cannot be negative".into()));
        }
        if self.max_suggestions == 0 {
            return Err(Error::Config("suggestions.max must be positive".into()));
        }
        Ok(())
    }

    /// Render as TOML in the same layout as the config file
    pub fn to_toml(&self) -> Result<String> {
        let raw = RawConfig {
            currency_symbol: Some(self.currency_symbol.clone()),
            thresholds: Some(RawThresholds {
                low: Some(self.thresholds.low),
                medium: Some(self.thresholds.medium),
                high: Some(self.thresholds.high),
            }),
            window: Some(RawWindow {
                days: Some(self.window_days),
                recent_days: Some(self.recent_days),
            }),
            suggestions: Some(RawSuggestions {
                max: Some(self.max_suggestions),
                min: Some(self.min_suggestions),
            }),
        };
        toml::to_string_pretty(&raw).map_err(|e| Error::Config(e.to_string()))
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("tally").join("config").join("analyzer.toml"))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize, Serialize)]
struct RawConfig {
    currency_symbol: Option<String>,
    thresholds: Option<RawThresholds>,
    window: Option<RawWindow>,
    suggestions: Option<RawSuggestions>,
}

#[derive(Debug, Deserialize, Serialize)]
struct RawThresholds {
    low: Option<f64>,
    medium: Option<f64>,
    high: Option<f64>,
}

#[derive(Debug, Deserialize, Serialize)]
struct RawWindow {
    days: Option<u32>,
    recent_days: Option<i64>,
}

#[derive(Debug, Deserialize, Serialize)]
struct RawSuggestions {
    max: Option<usize>,
    min: Option<usize>,
}
