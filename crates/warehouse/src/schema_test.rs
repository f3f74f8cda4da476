//! Tests for table definitions and row validation

use serde_json::json;

use super::{Field, FieldMode, FieldType, TableDef};

fn graph_def() -> TableDef {
    TableDef::new(
        "customer_graph",
        vec![
            Field::required("GUID", FieldType::String),
            Field::nullable("UserEmail", FieldType::String),
            Field::nullable("BillingID", FieldType::String),
            Field::nullable("ShippingID", FieldType::String),
            Field::required("Date", FieldType::Date),
        ],
    )
}

#[test]
fn test_create_ddl() {
    let ddl = graph_def().create_ddl("cdp_dev");

    assert!(ddl.starts_with("CREATE TABLE cdp_dev.customer_graph ("));
    assert!(!ddl.contains("IF NOT EXISTS"));
    assert!(ddl.contains("`GUID` String"));
    assert!(ddl.contains("`UserEmail` Nullable(String)"));
    assert!(ddl.contains("`Date` Date"));
    assert!(ddl.contains("ENGINE = MergeTree()"));
    assert!(ddl.contains("ORDER BY `GUID`"));
}

#[test]
fn test_field_lookup() {
    let def = graph_def();
    assert_eq!(def.field("GUID").unwrap().mode, FieldMode::Required);
    assert_eq!(def.field("BillingID").unwrap().mode, FieldMode::Nullable);
    assert!(def.field("Email").is_none());
}

#[test]
fn test_valid_row_passes() {
    let row = json!({
        "GUID": "G-123",
        "UserEmail": "a@x.com",
        "BillingID": null,
        "ShippingID": null,
        "Date": "2026-08-07",
    });
    assert!(graph_def().validate_row(0, &row).is_empty());
}

#[test]
fn test_absent_nullable_column_passes() {
    let row = json!({"GUID": "G-123", "Date": "2026-08-07"});
    assert!(graph_def().validate_row(0, &row).is_empty());
}

#[test]
fn test_null_in_required_column() {
    let row = json!({
        "GUID": null,
        "UserEmail": "a@x.com",
        "Date": "2026-08-07",
    });
    let errors = graph_def().validate_row(2, &row);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].index, 2);
    assert_eq!(errors[0].column.as_deref(), Some("GUID"));
    assert!(errors[0].message.contains("required"));
}

#[test]
fn test_missing_required_column() {
    let row = json!({"GUID": "G-123", "UserEmail": "a@x.com"});
    let errors = graph_def().validate_row(0, &row);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].column.as_deref(), Some("Date"));
}

#[test]
fn test_type_mismatch() {
    let row = json!({"GUID": 42, "Date": "2026-08-07"});
    let errors = graph_def().validate_row(0, &row);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].column.as_deref(), Some("GUID"));
    assert!(errors[0].message.contains("type mismatch"));
}

#[test]
fn test_bad_date_literal() {
    for bad in ["07/08/2026", "2026-8-7", "2026-08-07T00:00:00Z", "today"] {
        let row = json!({"GUID": "G-1", "Date": bad});
        let errors = graph_def().validate_row(0, &row);
        assert_eq!(errors.len(), 1, "expected rejection for {bad:?}");
        assert_eq!(errors[0].column.as_deref(), Some("Date"));
    }
}

#[test]
fn test_unknown_column() {
    let row = json!({"GUID": "G-1", "Date": "2026-08-07", "Extra": "x"});
    let errors = graph_def().validate_row(0, &row);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].column.as_deref(), Some("Extra"));
    assert!(errors[0].message.contains("unknown column"));
}

#[test]
fn test_non_object_row() {
    let errors = graph_def().validate_row(5, &json!(["G-1", "2026-08-07"]));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].index, 5);
    assert!(errors[0].column.is_none());
}
