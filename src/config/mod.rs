//! Configuration management
//!
//! This module handles loading and managing configuration from
//! TOML files and CLI arguments.

use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::core::constants::{defaults, files, limits, output_formats};
use crate::core::error::{Result, SalesboardError};
use crate::core::types::Granularity;
use crate::storage::DataPaths;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding transactions.csv and customers.csv
    pub data_dir: Option<String>,

    /// Number of transactions to generate
    pub transactions: Option<usize>,

    /// Number of distinct customer ids to draw from
    pub customer_pool: Option<u32>,

    /// Random seed for generation
    pub seed: Option<u64>,

    /// Days of history ending at the generation end date
    pub history_days: Option<i64>,

    /// Output format (text, json, minimal)
    pub output_format: Option<String>,

    /// Enable verbose logging
    pub verbose: Option<bool>,

    /// Where the static HTML dashboard is written
    pub dashboard_path: Option<String>,

    /// Address the dashboard server listens on
    pub bind: Option<String>,

    /// Number of products in the top products ranking
    pub top_products: Option<usize>,

    /// Time series granularity (day, week, month)
    pub granularity: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: Some(files::DEFAULT_DATA_DIR.to_string()),
            transactions: Some(defaults::TRANSACTIONS),
            customer_pool: Some(defaults::CUSTOMER_POOL),
            seed: Some(defaults::SEED),
            history_days: Some(defaults::HISTORY_DAYS),
            output_format: Some(output_formats::DEFAULT.to_string()),
            verbose: Some(false),
            dashboard_path: Some(files::DEFAULT_DASHBOARD_PATH.to_string()),
            bind: Some(defaults::BIND_ADDR.to_string()),
            top_products: Some(defaults::TOP_PRODUCTS),
            granularity: Some(defaults::GRANULARITY.to_string()),
        }
    }
}

impl Config {
    /// Load configuration from file, falling back to defaults for absent keys
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            SalesboardError::Config(format!(
                "Could not read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let loaded: Config = toml::from_str(&content).map_err(|e| {
            SalesboardError::Config(format!(
                "Invalid TOML in config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config = Self::default().overlay(loaded);
        config.validate()?;
        Ok(config)
    }

    /// Try to find and load a config file in standard locations
    pub fn load_from_standard_locations() -> Self {
        if let Ok(config) = Self::load_from_file(files::CONFIG_FILE_NAME) {
            return config;
        }

        // Parent directories, up to 3 levels
        for i in 1..=3 {
            let path = format!("{}{}", "../".repeat(i), files::CONFIG_FILE_NAME);
            if let Ok(config) = Self::load_from_file(&path) {
                return config;
            }
        }

        Self::default()
    }

    /// Replace every field that is set in `other`
    fn overlay(self, other: Config) -> Self {
        Self {
            data_dir: other.data_dir.or(self.data_dir),
            transactions: other.transactions.or(self.transactions),
            customer_pool: other.customer_pool.or(self.customer_pool),
            seed: other.seed.or(self.seed),
            history_days: other.history_days.or(self.history_days),
            output_format: other.output_format.or(self.output_format),
            verbose: other.verbose.or(self.verbose),
            dashboard_path: other.dashboard_path.or(self.dashboard_path),
            bind: other.bind.or(self.bind),
            top_products: other.top_products.or(self.top_products),
            granularity: other.granularity.or(self.granularity),
        }
    }

    /// Merge this config with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli_config: &CliConfig) {
        // Data
        if let Some(ref data_dir) = cli_config.data_dir {
            self.data_dir = Some(data_dir.clone());
        }

        // Generation
        if let Some(transactions) = cli_config.transactions {
            self.transactions = Some(transactions);
        }
        if let Some(customer_pool) = cli_config.customer_pool {
            self.customer_pool = Some(customer_pool);
        }
        if let Some(seed) = cli_config.seed {
            self.seed = Some(seed);
        }
        if let Some(history_days) = cli_config.history_days {
            self.history_days = Some(history_days);
        }

        // Output & format
        if cli_config.verbose {
            self.verbose = Some(true);
        }
        if let Some(ref output_format) = cli_config.output_format {
            self.output_format = Some(output_format.clone());
        }
        if let Some(ref dashboard_path) = cli_config.dashboard_path {
            self.dashboard_path = Some(dashboard_path.clone());
        }
        if let Some(top_products) = cli_config.top_products {
            self.top_products = Some(top_products);
        }
        if let Some(ref granularity) = cli_config.granularity {
            self.granularity = Some(granularity.clone());
        }

        // Server
        if let Some(ref bind) = cli_config.bind {
            self.bind = Some(bind.clone());
        }
    }

    /// Paths of the two data files
    pub fn data_paths(&self) -> DataPaths {
        DataPaths::in_dir(
            self.data_dir
                .as_deref()
                .unwrap_or(files::DEFAULT_DATA_DIR),
        )
    }

    pub fn dashboard_path(&self) -> PathBuf {
        PathBuf::from(
            self.dashboard_path
                .as_deref()
                .unwrap_or(files::DEFAULT_DASHBOARD_PATH),
        )
    }

    pub fn top_products(&self) -> usize {
        self.top_products.unwrap_or(defaults::TOP_PRODUCTS)
    }

    pub fn output_format(&self) -> &str {
        self.output_format
            .as_deref()
            .unwrap_or(output_formats::DEFAULT)
    }

    /// Parsed time series granularity
    pub fn granularity(&self) -> Result<Granularity> {
        self.granularity
            .as_deref()
            .unwrap_or(defaults::GRANULARITY)
            .parse()
    }

    /// Parsed server bind address
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        let bind = self.bind.as_deref().unwrap_or(defaults::BIND_ADDR);
        bind.parse().map_err(|_| {
            SalesboardError::Config(format!(
                "Bind address '{bind}' is invalid. Expected HOST:PORT, e.g. {}.",
                defaults::BIND_ADDR
            ))
        })
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if let Some(transactions) = self.transactions {
            if transactions == 0 {
                return Err(SalesboardError::Config(
                    "Transaction count cannot be 0. Expected a positive integer.".to_string(),
                ));
            }
            if transactions > limits::MAX_TRANSACTIONS {
                return Err(SalesboardError::Config(format!(
                    "Transaction count of {transactions} exceeds the maximum of {}.",
                    limits::MAX_TRANSACTIONS
                )));
            }
        }

        if let Some(pool) = self.customer_pool
            && !(1..=limits::MAX_CUSTOMER_POOL).contains(&pool)
        {
            return Err(SalesboardError::Config(format!(
                "Customer pool of {pool} is invalid. Expected a value between 1-{}.",
                limits::MAX_CUSTOMER_POOL
            )));
        }

        if let Some(days) = self.history_days
            && !(1..=limits::MAX_HISTORY_DAYS).contains(&days)
        {
            return Err(SalesboardError::Config(format!(
                "History of {days} days is invalid. Expected a value between 1-{}.",
                limits::MAX_HISTORY_DAYS
            )));
        }

        if let Some(top) = self.top_products
            && !(1..=limits::MAX_TOP_PRODUCTS).contains(&top)
        {
            return Err(SalesboardError::Config(format!(
                "Top products count of {top} is invalid. Expected a value between 1-{}.",
                limits::MAX_TOP_PRODUCTS
            )));
        }

        if let Some(ref format) = self.output_format
            && !output_formats::ALL.contains(&format.as_str())
        {
            return Err(SalesboardError::Config(format!(
                "Invalid output format '{format}'. Expected one of: {}.",
                output_formats::ALL.join(", ")
            )));
        }

        self.granularity()
            .map_err(|e| SalesboardError::Config(e.to_string()))?;
        self.bind_addr()?;

        Ok(())
    }
}

/// Configuration options that can come from CLI
#[derive(Debug, Default)]
pub struct CliConfig {
    // Data
    pub data_dir: Option<String>, // --data-dir

    // Generation
    pub transactions: Option<usize>, // --transactions
    pub customer_pool: Option<u32>,  // --customers
    pub seed: Option<u64>,           // --seed
    pub history_days: Option<i64>,   // --history-days

    // Output & format
    pub quiet: bool,                      // --quiet
    pub verbose: bool,                    // --verbose
    pub output_format: Option<String>,    // --format
    pub dashboard_path: Option<String>,   // --output
    pub top_products: Option<usize>,      // --top
    pub granularity: Option<String>,      // --granularity

    // Server
    pub bind: Option<String>, // --bind

    // Configuration
    pub config_file: Option<String>, // --config
    pub no_config: bool,             // --no-config
}
