//! Source table references
//!
//! The four read-only inputs of the provisioning query, each fully
//! qualified as `database.table`.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// A fully-qualified table reference (`database.table`)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct TableRef {
    /// Database (dataset) holding the table
    pub database: String,
    /// Table name
    pub table: String,
}

impl TableRef {
    /// Create a reference from database and table parts
    pub fn new(database: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            table: table.into(),
        }
    }

    /// Render as `database.table` for use in SQL
    pub fn qualified(&self) -> String {
        format!("{}.{}", self.database, self.table)
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.database, self.table)
    }
}

impl FromStr for TableRef {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (database, table) = s
            .split_once('.')
            .ok_or_else(|| format!("table reference '{s}' must be 'database.table'"))?;

        if database.is_empty() || table.is_empty() || table.contains('.') {
            return Err(format!("table reference '{s}' must be 'database.table'"));
        }

        if !is_valid_identifier(database) || !is_valid_identifier(table) {
            return Err(format!(
                "table reference '{s}' may only contain letters, numbers, and underscores"
            ));
        }

        Ok(Self::new(database, table))
    }
}

impl TryFrom<String> for TableRef {
    type Error = String;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        s.parse()
    }
}

fn is_valid_identifier(name: &str) -> bool {
    !name.is_empty()
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !name.chars().next().is_some_and(|c| c.is_ascii_digit())
}

/// The four source tables consumed by the provisioning query
///
/// # Example
///
/// ```toml
/// [sources]
/// dim_users = "edw_olap.dim_users"
/// sales_orders = "sales.invoices_and_orders"
/// subscriptions = "edw_nonolap.report_user_subscriptions"
/// guid_assignments = "cdp.all_users_with_guid"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct SourceTables {
    /// Dimensional "all users" table (`Email` column)
    pub dim_users: TableRef,

    /// Sales/orders fact table (`UserEmail` column)
    pub sales_orders: TableRef,

    /// Subscriptions table (`email` column)
    pub subscriptions: TableRef,

    /// GUID assignment table keyed by `UserEmail`
    pub guid_assignments: TableRef,
}
