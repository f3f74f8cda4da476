//! Warehouse connection configuration

use serde::Deserialize;

/// Default warehouse HTTP URL
pub const DEFAULT_URL: &str = "http://localhost:8123";

/// Warehouse connection settings
///
/// # Example
///
/// ```toml
/// [warehouse]
/// url = "http://clickhouse:8123"
/// database = "cdp_dev"
/// username = "loader"
/// password = "secret"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WarehouseConfig {
    /// ClickHouse HTTP URL
    /// Default: "http://localhost:8123"
    pub url: String,

    /// Database holding the destination tables (the dataset)
    /// Default: "default"
    pub database: String,

    /// Username for authentication (optional)
    pub username: Option<String>,

    /// Password for authentication (optional)
    pub password: Option<String>,
}

impl Default for WarehouseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            database: "default".to_string(),
            username: None,
            password: None,
        }
    }
}
