//! Warehouse trait
//!
//! The seam between the provisioning workflow and a concrete engine.
//! Every call is a blocking round trip from the workflow's point of view;
//! there is no retry policy at this layer.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::{RowError, WarehouseError};
use crate::schema::TableDef;

/// Operations the provisioning workflow needs from a warehouse
#[async_trait]
pub trait Warehouse: Send + Sync {
    /// Create a table from its definition
    ///
    /// Fails with an error recognizable via
    /// [`WarehouseError::is_already_exists`] when the table is already
    /// there.
    async fn create_table(&self, def: &TableDef) -> Result<(), WarehouseError>;

    /// Execute a SELECT and materialize all result rows in memory
    async fn fetch_rows(&self, sql: &str) -> Result<Vec<Map<String, Value>>, WarehouseError>;

    /// Batch-insert rows into a destination table
    ///
    /// Returns `Ok` with an empty list when every row was accepted, `Ok`
    /// with the row-level rejections otherwise (accepted rows are still
    /// written), and `Err` only for transport or engine failure.
    async fn insert_rows(
        &self,
        def: &TableDef,
        rows: &[Value],
    ) -> Result<Vec<RowError>, WarehouseError>;

    /// Whether a table exists in the configured database
    async fn table_exists(&self, table: &str) -> Result<bool, WarehouseError>;

    /// Backend name for logs
    fn name(&self) -> &'static str;
}
