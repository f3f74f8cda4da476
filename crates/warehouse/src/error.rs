//! Warehouse errors

use std::fmt;

use thiserror::Error;

/// Errors from warehouse operations
#[derive(Debug, Error)]
pub enum WarehouseError {
    /// Failed to reach the warehouse
    #[error("warehouse connection failed: {0}")]
    Connection(String),

    /// The engine rejected or failed a statement
    #[error("warehouse error: {0}")]
    Execution(String),

    /// Failed to decode an engine response
    #[error("failed to decode warehouse response: {0}")]
    Serialization(String),
}

impl WarehouseError {
    /// Whether the engine rejected a CREATE TABLE because the table is
    /// already there - the expected steady state after the first run.
    pub fn is_already_exists(&self) -> bool {
        match self {
            Self::Execution(msg) => {
                // ClickHouse: "Code: 57. DB::Exception: Table ... already exists."
                msg.contains("already exists") || msg.contains("Code: 57")
            }
            _ => false,
        }
    }
}

/// A row-level insert rejection
///
/// Returned in a list from [`Warehouse::insert_rows`]; an empty list means
/// every row was accepted.
///
/// [`Warehouse::insert_rows`]: crate::Warehouse::insert_rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    /// Zero-based index of the row within the submitted batch
    pub index: usize,

    /// Offending column, when the rejection is column-specific
    pub column: Option<String>,

    /// Engine-style rejection message
    pub message: String,
}

impl RowError {
    /// Create a rejection tied to a specific column
    pub fn column(index: usize, column: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            index,
            column: Some(column.into()),
            message: message.into(),
        }
    }

    /// Create a rejection for the row as a whole
    pub fn row(index: usize, message: impl Into<String>) -> Self {
        Self {
            index,
            column: None,
            message: message.into(),
        }
    }
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.column {
            Some(col) => write!(f, "row {}: column '{}': {}", self.index, col, self.message),
            None => write!(f, "row {}: {}", self.index, self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_exists_detection() {
        let err = WarehouseError::Execution(
            "clickhouse error (400 Bad Request): Code: 57. DB::Exception: \
             Table cdp.customer_graph already exists."
                .to_string(),
        );
        assert!(err.is_already_exists());

        let err = WarehouseError::Execution("Code: 60. DB::Exception: Unknown table".to_string());
        assert!(!err.is_already_exists());

        let err = WarehouseError::Connection("connection refused".to_string());
        assert!(!err.is_already_exists());
    }

    #[test]
    fn test_row_error_display() {
        let err = RowError::column(3, "GUID", "null in required column");
        assert_eq!(err.to_string(), "row 3: column 'GUID': null in required column");

        let err = RowError::row(0, "row is not a JSON object");
        assert_eq!(err.to_string(), "row 0: row is not a JSON object");
    }
}
