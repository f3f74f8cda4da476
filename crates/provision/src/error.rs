//! Provisioning errors
//!
//! Only the fatal cases are typed. Table-creation and insert failures are
//! non-fatal and surface through logs and the run report instead.

use thiserror::Error;

use graft_warehouse::WarehouseError;

/// Errors that terminate a provisioning run
#[derive(Debug, Error)]
pub enum ProvisionError {
    /// The candidate query failed
    #[error("candidate query failed: {0}")]
    Query(#[source] WarehouseError),

    /// A query result row could not be decoded
    #[error("failed to decode candidate row: {message}")]
    Decode {
        /// Decoder message
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_error_display() {
        let err = ProvisionError::Query(WarehouseError::Execution("Code: 60".to_string()));
        assert!(err.to_string().contains("candidate query failed"));
    }

    #[test]
    fn test_decode_error_display() {
        let err = ProvisionError::Decode {
            message: "missing field `GUID`".to_string(),
        };
        assert!(err.to_string().contains("missing field `GUID`"));
    }
}
