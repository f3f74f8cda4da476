//! Warehouse access layer
//!
//! A small seam between the provisioning workflow and the warehouse
//! engine: the [`Warehouse`] trait covers the four operations the workflow
//! needs (create table, run a SELECT, batch-insert rows, existence check),
//! and [`ClickHouseWarehouse`] implements it over the ClickHouse HTTP
//! interface using JSONEachRow.
//!
//! Inserts report row-level rejections as a list rather than raising, so
//! callers can log partial failures and keep going.

mod backend;
mod clickhouse;
mod error;
mod schema;

pub use backend::Warehouse;
pub use clickhouse::{ClickHouseConfig, ClickHouseWarehouse};
pub use error::{RowError, WarehouseError};
pub use schema::{Field, FieldMode, FieldType, TableDef};
