//! Destination table names
//!
//! The three tables the workflow writes: two customer-graph mirrors and
//! the used-GUID audit log. Names are configurable; the tables live in the
//! warehouse database from `[warehouse]`.

use serde::Deserialize;

use crate::error::{ConfigError, Result};

/// Destination table names
///
/// # Example
///
/// ```toml
/// [destinations]
/// customer_graph = "customer_graph"
/// customer_graph_legacy = "customer_graph_legacy"
/// used_guids = "used_guids"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DestinationTables {
    /// Primary customer-graph table
    pub customer_graph: String,

    /// Legacy mirror of the customer-graph table
    pub customer_graph_legacy: String,

    /// Append-only audit log of consumed GUIDs
    pub used_guids: String,
}

impl Default for DestinationTables {
    fn default() -> Self {
        Self {
            customer_graph: "customer_graph".to_string(),
            customer_graph_legacy: "customer_graph_legacy".to_string(),
            used_guids: "used_guids".to_string(),
        }
    }
}

impl DestinationTables {
    /// Validate that all names are present and distinct
    pub fn validate(&self) -> Result<()> {
        let named = [
            ("customer_graph", &self.customer_graph),
            ("customer_graph_legacy", &self.customer_graph_legacy),
            ("used_guids", &self.used_guids),
        ];

        for (field, name) in named {
            if name.is_empty() {
                return Err(ConfigError::EmptyDestination { field });
            }
            if !is_valid_identifier(name) {
                return Err(ConfigError::InvalidDestination {
                    field,
                    name: name.clone(),
                });
            }
        }

        for (i, (_, name)) in named.iter().enumerate() {
            if named.iter().skip(i + 1).any(|(_, other)| other == name) {
                return Err(ConfigError::DuplicateDestination {
                    name: (*name).clone(),
                });
            }
        }

        Ok(())
    }
}

fn is_valid_identifier(name: &str) -> bool {
    name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !name.chars().next().is_some_and(|c| c.is_ascii_digit())
}
