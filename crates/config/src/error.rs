//! Configuration error types

use std::io;
use thiserror::Error;

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur when loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file
    #[error("failed to read config file '{path}': {source}")]
    IoError {
        /// Path to the file
        path: String,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// Failed to parse TOML
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Validation error - destination table name is empty
    #[error("destination '{field}' must not be empty")]
    EmptyDestination {
        /// Config field name
        field: &'static str,
    },

    /// Validation error - destination table name is not a valid identifier
    #[error("destination '{field}' has invalid table name '{name}'")]
    InvalidDestination {
        /// Config field name
        field: &'static str,
        /// The offending table name
        name: String,
    },

    /// Validation error - the same table name used for two destinations
    #[error("destination table '{name}' is used more than once")]
    DuplicateDestination {
        /// The conflicting table name
        name: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_destination_error() {
        let err = ConfigError::EmptyDestination {
            field: "used_guids",
        };
        assert!(err.to_string().contains("used_guids"));
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_duplicate_destination_error() {
        let err = ConfigError::DuplicateDestination {
            name: "customer_graph".to_string(),
        };
        assert!(err.to_string().contains("customer_graph"));
        assert!(err.to_string().contains("more than once"));
    }
}
