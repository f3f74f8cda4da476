//! Graft Configuration
//!
//! TOML-based configuration loading with sensible defaults. Only the
//! `[sources]` section is mandatory - everything else has a default.
//!
//! # Parsing
//!
//! Use the `FromStr` trait to parse configuration:
//!
//! ```
//! use graft_config::Config;
//! use std::str::FromStr;
//!
//! let config = Config::from_str(
//!     "[sources]\n\
//!      dim_users = \"edw_olap.dim_users\"\n\
//!      sales_orders = \"sales.invoices_and_orders\"\n\
//!      subscriptions = \"edw_nonolap.report_user_subscriptions\"\n\
//!      guid_assignments = \"cdp.all_users_with_guid\"\n",
//! )
//! .unwrap();
//! assert_eq!(config.destinations.customer_graph, "customer_graph");
//! ```
//!
//! # Example Full Config
//!
//! See `configs/example.toml` for all available options.

mod destinations;
mod error;
mod logging;
mod sources;
mod warehouse;

use std::fs;
use std::path::Path;
use std::str::FromStr;

pub use destinations::DestinationTables;
pub use error::{ConfigError, Result};
pub use logging::{LogConfig, LogLevel};
pub use sources::{SourceTables, TableRef};
pub use warehouse::WarehouseConfig;

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Warehouse connection (URL, database, credentials)
    #[serde(default)]
    pub warehouse: WarehouseConfig,

    /// Read-only source table references (required)
    pub sources: SourceTables,

    /// Destination table names
    #[serde(default)]
    pub destinations: DestinationTables,

    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or contains invalid TOML.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::from_str(&contents)
    }

    /// Parse configuration from a TOML string
    ///
    /// Prefer using the `FromStr` trait implementation.
    fn parse(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s).map_err(ConfigError::ParseError)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// Checks that destination table names are present and distinct.
    fn validate(&self) -> Result<()> {
        self.destinations.validate()
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
