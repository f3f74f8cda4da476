//! Destination table schemas
//!
//! Two shapes: the common customer-graph schema (both mirrors) and the
//! narrower used-GUID audit schema. Table names come from configuration;
//! column names are fixed.

use graft_warehouse::{Field, FieldType, TableDef};

/// GUID column, required everywhere
pub const COL_GUID: &str = "GUID";
/// User email column, nullable
pub const COL_USER_EMAIL: &str = "UserEmail";
/// Billing identifier column, nullable
pub const COL_BILLING_ID: &str = "BillingID";
/// Shipping identifier column, nullable
pub const COL_SHIPPING_ID: &str = "ShippingID";
/// Insertion-date column, required everywhere
pub const COL_DATE: &str = "Date";

/// Definition for a customer-graph table
pub fn graph_table(name: &str) -> TableDef {
    TableDef::new(
        name,
        vec![
            Field::required(COL_GUID, FieldType::String),
            Field::nullable(COL_USER_EMAIL, FieldType::String),
            Field::nullable(COL_BILLING_ID, FieldType::String),
            Field::nullable(COL_SHIPPING_ID, FieldType::String),
            Field::required(COL_DATE, FieldType::Date),
        ],
    )
}

/// Definition for the used-GUID audit table
pub fn audit_table(name: &str) -> TableDef {
    TableDef::new(
        name,
        vec![
            Field::required(COL_GUID, FieldType::String),
            Field::required(COL_DATE, FieldType::Date),
        ],
    )
}

#[cfg(test)]
#[path = "schema_test.rs"]
mod schema_test;
