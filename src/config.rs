use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::Path;

pub const IN_MEMORY_PATH: &str = ":memory:";

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub inventory: InventoryConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct InventoryConfig {
    #[serde(default = "default_low_stock_threshold")]
    pub low_stock_threshold: f64,
    #[serde(default = "default_medium_stock_threshold")]
    pub medium_stock_threshold: f64,
}

fn default_low_stock_threshold() -> f64 {
    crate::views::DEFAULT_LOW_STOCK_THRESHOLD
}

fn default_medium_stock_threshold() -> f64 {
    crate::views::DEFAULT_MEDIUM_STOCK_THRESHOLD
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            low_stock_threshold: default_low_stock_threshold(),
            medium_stock_threshold: default_medium_stock_threshold(),
        }
    }
}

impl InventoryConfig {
    pub fn validate(&self) -> Result<()> {
        let (low, medium) = (self.low_stock_threshold, self.medium_stock_threshold);
        if !(low > 0.0 && low < medium && medium <= 1.0) {
            return Err(Error::Config(format!(
                "stock thresholds must satisfy 0 < low < medium <= 1 (got low={}, medium={})",
                low, medium
            )));
        }
        Ok(())
    }
}

/// Default configuration embedded in the binary.
/// An in-memory database keeps edits for the running session only.
const DEFAULT_CONFIG: &str = r#"
[database]
path = ":memory:"

[inventory]
low_stock_threshold = 0.2
medium_stock_threshold = 0.5
"#;

pub fn default_config() -> Result<Config> {
    parse_config(DEFAULT_CONFIG)
}

pub fn parse_config(contents: &str) -> Result<Config> {
    let config: Config = toml::from_str(contents)?;
    config.inventory.validate()?;
    Ok(config)
}

/// Load configuration from `path` if it exists, otherwise fall back to the
/// embedded default.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        if path.exists() {
            tracing::info!("Loading config from: {}", path.display());
            let contents = std::fs::read_to_string(path)?;
            return parse_config(&contents);
        }
        tracing::warn!("config file not found at: {}", path.display());
    }

    tracing::info!("Using default embedded configuration");
    default_config()
}
