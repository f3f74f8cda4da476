//! ClickHouse warehouse implementation
//!
//! Talks to ClickHouse over the HTTP interface: SELECTs go out as GET
//! requests with `FORMAT JSONEachRow`, DDL and inserts as POST (the HTTP
//! interface treats GET as read-only).

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::backend::Warehouse;
use crate::error::{RowError, WarehouseError};
use crate::schema::TableDef;

/// Default ClickHouse HTTP URL
pub const DEFAULT_URL: &str = "http://localhost:8123";

/// ClickHouse connection configuration
#[derive(Debug, Clone)]
pub struct ClickHouseConfig {
    /// ClickHouse HTTP URL (e.g., "http://localhost:8123")
    pub url: String,

    /// Database holding the destination tables
    pub database: String,

    /// Username for authentication (optional)
    pub username: Option<String>,

    /// Password for authentication (optional)
    pub password: Option<String>,

    /// Max execution time in seconds
    pub max_execution_time: u64,
}

impl Default for ClickHouseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.into(),
            database: "default".into(),
            username: None,
            password: None,
            max_execution_time: 300,
        }
    }
}

impl ClickHouseConfig {
    /// Create a new config with URL and database
    pub fn new(url: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            database: database.into(),
            ..Default::default()
        }
    }

    /// Set authentication credentials
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }
}

/// ClickHouse warehouse over the HTTP interface
#[derive(Clone)]
pub struct ClickHouseWarehouse {
    client: reqwest::Client,
    config: ClickHouseConfig,
}

impl std::fmt::Debug for ClickHouseWarehouse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClickHouseWarehouse")
            .field("url", &self.config.url)
            .field("database", &self.config.database)
            .finish()
    }
}

impl ClickHouseWarehouse {
    /// Create a new warehouse handle from config
    pub fn new(config: &ClickHouseConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config: config.clone(),
        }
    }

    /// Create a handle and test the connection
    pub async fn connect(config: &ClickHouseConfig) -> Result<Self, WarehouseError> {
        let warehouse = Self::new(config);
        warehouse.fetch_text("SELECT 1").await.map_err(|e| {
            WarehouseError::Connection(format!(
                "failed to connect to ClickHouse at {}: {e}",
                config.url
            ))
        })?;
        Ok(warehouse)
    }

    /// The configured database name
    pub fn database(&self) -> &str {
        &self.config.database
    }

    /// Get the ClickHouse server version
    pub async fn version(&self) -> Result<String, WarehouseError> {
        let text = self.fetch_text("SELECT version()").await?;
        Ok(text.trim().to_string())
    }

    /// Execute a statement with no result (DDL)
    pub async fn execute(&self, sql: &str) -> Result<(), WarehouseError> {
        let url = format!(
            "{}/?database={}",
            self.config.url,
            urlencode(&self.config.database)
        );
        self.post(&url, sql.to_string()).await
    }

    /// Build the GET URL for a SELECT
    fn build_select_url(&self, query: &str) -> String {
        format!(
            "{}/?database={}&max_execution_time={}&query={}",
            self.config.url,
            urlencode(&self.config.database),
            self.config.max_execution_time,
            urlencode(query)
        )
    }

    /// Run a SELECT and return the raw response body
    async fn fetch_text(&self, sql: &str) -> Result<String, WarehouseError> {
        let url = self.build_select_url(sql);

        let mut request = self.client.get(&url);
        if let (Some(user), Some(pass)) = (&self.config.username, &self.config.password) {
            request = request.basic_auth(user, Some(pass));
        }

        let response = request
            .send()
            .await
            .map_err(|e| WarehouseError::Connection(format!("ClickHouse request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(WarehouseError::Execution(format!(
                "clickhouse error ({status}): {body}"
            )));
        }

        response
            .text()
            .await
            .map_err(|e| WarehouseError::Execution(format!("failed to read response: {e}")))
    }

    /// POST a statement body (DDL, inserts)
    async fn post(&self, url: &str, body: String) -> Result<(), WarehouseError> {
        let mut request = self.client.post(url).body(body);
        if let (Some(user), Some(pass)) = (&self.config.username, &self.config.password) {
            request = request.basic_auth(user, Some(pass));
        }

        let response = request
            .send()
            .await
            .map_err(|e| WarehouseError::Connection(format!("ClickHouse request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(WarehouseError::Execution(format!(
                "clickhouse error ({status}): {body}"
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl Warehouse for ClickHouseWarehouse {
    async fn create_table(&self, def: &TableDef) -> Result<(), WarehouseError> {
        self.execute(&def.create_ddl(&self.config.database)).await
    }

    async fn fetch_rows(&self, sql: &str) -> Result<Vec<Map<String, Value>>, WarehouseError> {
        let query = format!("{} FORMAT JSONEachRow", sql.trim().trim_end_matches(';'));
        let response_text = self.fetch_text(&query).await?;

        let rows: Vec<Map<String, Value>> = response_text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                serde_json::from_str(line).map_err(|e| {
                    WarehouseError::Serialization(format!("failed to parse JSON row: {e}"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(rows = rows.len(), "clickhouse query executed");

        Ok(rows)
    }

    async fn insert_rows(
        &self,
        def: &TableDef,
        rows: &[Value],
    ) -> Result<Vec<RowError>, WarehouseError> {
        let mut errors = Vec::new();
        let mut body = String::new();
        let mut accepted = 0usize;

        for (index, row) in rows.iter().enumerate() {
            let row_errors = def.validate_row(index, row);
            if row_errors.is_empty() {
                let line = serde_json::to_string(row).map_err(|e| {
                    WarehouseError::Serialization(format!("failed to encode row {index}: {e}"))
                })?;
                body.push_str(&line);
                body.push('\n');
                accepted += 1;
            } else {
                errors.extend(row_errors);
            }
        }

        if accepted > 0 {
            let insert = format!(
                "INSERT INTO {}.{} FORMAT JSONEachRow",
                self.config.database, def.name
            );
            let url = format!(
                "{}/?database={}&query={}",
                self.config.url,
                urlencode(&self.config.database),
                urlencode(&insert)
            );
            self.post(&url, body).await?;
        }

        tracing::debug!(
            table = %def.name,
            accepted = accepted,
            rejected = errors.len(),
            "clickhouse insert finished"
        );

        Ok(errors)
    }

    async fn table_exists(&self, table: &str) -> Result<bool, WarehouseError> {
        let sql = format!(
            "SELECT 1 FROM system.tables WHERE database = '{}' AND name = '{}' LIMIT 1",
            sql_escape(&self.config.database),
            sql_escape(table)
        );
        let text = self.fetch_text(&sql).await?;
        Ok(!text.trim().is_empty())
    }

    fn name(&self) -> &'static str {
        "clickhouse"
    }
}

/// Escape a string literal for interpolation into SQL
fn sql_escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Percent-encode a query string value
fn urlencode(s: &str) -> String {
    let mut result = String::with_capacity(s.len() * 3);
    for c in s.chars() {
        match c {
            'A'..='Z' | 'a'..='z' | '0'..='9' | '-' | '_' | '.' | '~' => {
                result.push(c);
            }
            ' ' => result.push_str("%20"),
            _ => {
                for byte in c.to_string().as_bytes() {
                    result.push_str(&format!("%{:02X}", byte));
                }
            }
        }
    }
    result
}

#[cfg(test)]
#[path = "clickhouse_test.rs"]
mod clickhouse_test;
