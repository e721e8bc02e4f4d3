//! # Report Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     STOCKROOM_CURRENCY=$                                               │
//! │     STOCKROOM_FORMAT=json                                              │
//! │                                                                         │
//! │  2. Snapshot settings (currency only, when no env override)            │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     ~/.config/stockroom/report.toml (Linux)                            │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     ₾, text output, top 6 products, low stock at 10                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [display]
//! currency_symbol = "₾"
//! format = "text"   # text | json
//!
//! [report]
//! top_products = 6
//! low_stock_threshold = 10
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use stockroom_core::money::DEFAULT_CURRENCY_SYMBOL;
use stockroom_core::{DEFAULT_TOP_PRODUCTS, LOW_STOCK_THRESHOLD};

use crate::error::{ReportError, ReportResult};

// =============================================================================
// Output Format
// =============================================================================

/// How the report is written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Human-readable tables.
    #[default]
    Text,
    /// Pretty-printed JSON of the full report.
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(ReportError::InvalidConfig(format!(
                "Unknown output format: '{}'. Valid options: text, json",
                other
            ))),
        }
    }
}

// =============================================================================
// Sections
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// Symbol printed after every amount.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    #[serde(default)]
    pub format: OutputFormat,
}

fn default_currency_symbol() -> String {
    DEFAULT_CURRENCY_SYMBOL.to_string()
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            currency_symbol: default_currency_symbol(),
            format: OutputFormat::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSettings {
    /// Products listed in the sales-by-product section.
    #[serde(default = "default_top_products")]
    pub top_products: usize,

    /// Products at or below this stock level are listed as low.
    #[serde(default = "default_low_stock_threshold")]
    pub low_stock_threshold: i64,
}

fn default_top_products() -> usize {
    DEFAULT_TOP_PRODUCTS
}

fn default_low_stock_threshold() -> i64 {
    LOW_STOCK_THRESHOLD
}

impl Default for ReportSettings {
    fn default() -> Self {
        ReportSettings {
            top_products: default_top_products(),
            low_stock_threshold: default_low_stock_threshold(),
        }
    }
}

// =============================================================================
// Main Report Configuration
// =============================================================================

/// Complete reporting configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default)]
    pub display: DisplaySettings,

    #[serde(default)]
    pub report: ReportSettings,

    /// Set when the currency came from the environment; snapshot settings
    /// must not replace it then.
    #[serde(skip)]
    currency_pinned: bool,
}

impl ReportConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (report.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ReportResult<Self> {
        let explicit = config_path.is_some();
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading report config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else if explicit {
                return Err(ReportError::InvalidConfig(format!(
                    "config file not found: {}",
                    path.display()
                )));
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ReportResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ReportError::InvalidConfig("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Report config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ReportResult<()> {
        if self.display.currency_symbol.trim().is_empty() {
            return Err(ReportError::InvalidConfig(
                "currency_symbol must not be empty".into(),
            ));
        }

        if self.report.top_products == 0 {
            return Err(ReportError::InvalidConfig(
                "top_products must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Adopts the snapshot's currency unless the environment pinned one.
    pub fn adopt_snapshot_currency(&mut self, currency: Option<&str>) {
        if self.currency_pinned {
            return;
        }
        if let Some(symbol) = currency.map(str::trim).filter(|s| !s.is_empty()) {
            debug!(currency = %symbol, "Using currency from snapshot settings");
            self.display.currency_symbol = symbol.to_string();
        }
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup (the process env in production).
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(symbol) = lookup("STOCKROOM_CURRENCY") {
            debug!(currency = %symbol, "Overriding currency from environment");
            self.display.currency_symbol = symbol;
            self.currency_pinned = true;
        }

        if let Some(format) = lookup("STOCKROOM_FORMAT") {
            match format.parse() {
                Ok(parsed) => self.display.format = parsed,
                Err(_) => warn!(format = %format, "Unknown output format in environment"),
            }
        }

        if let Some(top) = lookup("STOCKROOM_TOP_PRODUCTS") {
            match top.parse::<usize>() {
                Ok(n) => self.report.top_products = n,
                Err(_) => warn!(value = %top, "Ignoring non-numeric STOCKROOM_TOP_PRODUCTS"),
            }
        }

        if let Some(threshold) = lookup("STOCKROOM_LOW_STOCK_THRESHOLD") {
            match threshold.parse::<i64>() {
                Ok(n) => self.report.low_stock_threshold = n,
                Err(_) => warn!(value = %threshold, "Ignoring non-numeric STOCKROOM_LOW_STOCK_THRESHOLD"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("ge", "stockroom", "report")
            .map(|dirs| dirs.config_dir().join("report.toml"))
    }

    /// Returns the currency symbol.
    pub fn currency(&self) -> &str {
        &self.display.currency_symbol
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_default_config() {
        let config = ReportConfig::default();
        assert_eq!(config.currency(), "₾");
        assert_eq!(config.display.format, OutputFormat::Text);
        assert_eq!(config.report.top_products, 6);
        assert_eq!(config.report.low_stock_threshold, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("TEXT".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_config_validation() {
        let mut config = ReportConfig::default();
        config.display.currency_symbol = "  ".into();
        assert!(config.validate().is_err());

        let mut config = ReportConfig::default();
        config.report.top_products = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_overrides() {
        let vars = env(&[
            ("STOCKROOM_CURRENCY", "$"),
            ("STOCKROOM_FORMAT", "json"),
            ("STOCKROOM_TOP_PRODUCTS", "3"),
            ("STOCKROOM_LOW_STOCK_THRESHOLD", "not-a-number"),
        ]);
        let mut config = ReportConfig::default();
        config.apply_overrides(|k| vars.get(k).cloned());

        assert_eq!(config.currency(), "$");
        assert_eq!(config.display.format, OutputFormat::Json);
        assert_eq!(config.report.top_products, 3);
        assert_eq!(config.report.low_stock_threshold, 10);
    }

    #[test]
    fn test_snapshot_currency_respects_env_pin() {
        let mut config = ReportConfig::default();
        config.adopt_snapshot_currency(Some("€"));
        assert_eq!(config.currency(), "€");

        config.adopt_snapshot_currency(Some("  "));
        assert_eq!(config.currency(), "€");

        let vars = env(&[("STOCKROOM_CURRENCY", "$")]);
        let mut pinned = ReportConfig::default();
        pinned.apply_overrides(|k| vars.get(k).cloned());
        pinned.adopt_snapshot_currency(Some("€"));
        assert_eq!(pinned.currency(), "$");
    }

    #[test]
    fn test_toml_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("report.toml");

        let mut config = ReportConfig::default();
        config.report.low_stock_threshold = 3;
        config.save(Some(path.clone())).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("[display]"));
        assert!(contents.contains("[report]"));

        let loaded: ReportConfig = toml::from_str(&contents).unwrap();
        assert_eq!(loaded.report.low_stock_threshold, 3);
        assert_eq!(loaded.display.format, OutputFormat::Text);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: ReportConfig = toml::from_str("[report]\ntop_products = 2\n").unwrap();
        assert_eq!(config.report.top_products, 2);
        assert_eq!(config.report.low_stock_threshold, 10);
        assert_eq!(config.currency(), "₾");
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = ReportConfig::load(Some(dir.path().join("absent.toml")));
        assert!(matches!(result, Err(ReportError::InvalidConfig(_))));
    }
}
