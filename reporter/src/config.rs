//! Configuration management for the dashboard report
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with INVDASH_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::{StockPolicy, DEFAULT_LOW_STOCK_THRESHOLD};
use std::path::{Path, PathBuf};

/// Main report configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Snapshot file locations
    pub snapshot: SnapshotConfig,

    /// Stock classification policy
    pub stock: StockConfig,

    /// Output configuration
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SnapshotConfig {
    /// JSON export of the product list endpoint
    pub products_path: PathBuf,

    /// JSON export of the inventory list endpoint
    pub inventory_path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StockConfig {
    /// Products with fewer units than this are low on stock
    pub low_stock_threshold: u64,
}

impl StockConfig {
    pub fn policy(&self) -> StockPolicy {
        StockPolicy::new(self.low_stock_threshold)
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Dashboard summary and product rows as JSON
    Json,
    /// Product table as CSV
    Csv,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    pub format: OutputFormat,

    /// CSV destination; stdout when unset
    pub csv_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new("config"))
    }

    /// Load configuration, reading the environment file from `config_dir`
    pub fn load_from(config_dir: &Path) -> Result<Self, ConfigError> {
        let environment =
            std::env::var("INVDASH_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("snapshot.products_path", "data/products.json")?
            .set_default("snapshot.inventory_path", "data/inventory.json")?
            .set_default(
                "stock.low_stock_threshold",
                DEFAULT_LOW_STOCK_THRESHOLD as i64,
            )?
            .set_default("output.format", "json")?
            // Load environment-specific config file
            .add_source(
                File::with_name(&config_dir.join(&environment).to_string_lossy()).required(false),
            )
            // Override with environment variables (INVDASH_ prefix)
            .add_source(
                Environment::with_prefix("INVDASH")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for StockConfig {
    fn default() -> Self {
        Self {
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENV_KEYS: [&str; 3] = [
        "INVDASH_ENVIRONMENT",
        "INVDASH_STOCK__LOW_STOCK_THRESHOLD",
        "INVDASH_OUTPUT__CSV_PATH",
    ];

    fn clear_env() {
        for key in ENV_KEYS {
            std::env::remove_var(key);
        }
    }

    // Environment variables are process-wide, so every layer is checked in one test
    #[test]
    fn test_configuration_layers() {
        clear_env();
        let dir = std::env::temp_dir().join(format!("invdash-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        // Defaults only
        let config = Config::load_from(&dir).unwrap();
        assert_eq!(config.environment, "development");
        assert_eq!(config.snapshot.products_path, PathBuf::from("data/products.json"));
        assert_eq!(config.stock.low_stock_threshold, DEFAULT_LOW_STOCK_THRESHOLD);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.output.csv_path.is_none());

        // Environment file over defaults
        std::fs::write(
            dir.join("staging.toml"),
            "[stock]\nlow_stock_threshold = 25\n\n[output]\nformat = \"csv\"\n",
        )
        .unwrap();
        std::env::set_var("INVDASH_ENVIRONMENT", "staging");
        let config = Config::load_from(&dir).unwrap();
        assert_eq!(config.environment, "staging");
        assert_eq!(config.stock.low_stock_threshold, 25);
        assert_eq!(config.output.format, OutputFormat::Csv);

        // INVDASH_ variables over the file
        std::env::set_var("INVDASH_STOCK__LOW_STOCK_THRESHOLD", "40");
        std::env::set_var("INVDASH_OUTPUT__CSV_PATH", "out/products.csv");
        let config = Config::load_from(&dir).unwrap();
        assert_eq!(config.stock.low_stock_threshold, 40);
        assert_eq!(config.stock.policy(), StockPolicy::new(40));
        assert_eq!(config.output.csv_path, Some(PathBuf::from("out/products.csv")));

        clear_env();
    }
}
