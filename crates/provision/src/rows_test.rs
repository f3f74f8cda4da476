//! Tests for row decoding and serialization

use chrono::NaiveDate;
use serde_json::{Map, Value, json};

use super::{CandidateRow, UsedGuidRow};

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 7).unwrap()
}

fn fetched(value: Value) -> Map<String, Value> {
    value.as_object().unwrap().clone()
}

#[test]
fn test_decode_fetched_row() {
    let row = CandidateRow::from_row(fetched(json!({
        "GUID": "G-123",
        "UserEmail": "a@x.com",
        "BillingID": null,
        "ShippingID": null,
        "Date": "2026-08-07",
    })))
    .unwrap();

    assert_eq!(row.guid, "G-123");
    assert_eq!(row.user_email.as_deref(), Some("a@x.com"));
    assert!(row.billing_id.is_none());
    assert!(row.shipping_id.is_none());
    assert_eq!(row.date, date());
}

#[test]
fn test_decode_missing_guid_fails() {
    let err = CandidateRow::from_row(fetched(json!({
        "UserEmail": "a@x.com",
        "BillingID": null,
        "ShippingID": null,
        "Date": "2026-08-07",
    })))
    .unwrap_err();

    assert!(err.to_string().contains("GUID"));
}

#[test]
fn test_graph_row_serialization() {
    let row = CandidateRow {
        guid: "G-123".to_string(),
        user_email: Some("a@x.com".to_string()),
        billing_id: None,
        shipping_id: None,
        date: date(),
    };

    assert_eq!(
        row.to_row(),
        json!({
            "GUID": "G-123",
            "UserEmail": "a@x.com",
            "BillingID": null,
            "ShippingID": null,
            "Date": "2026-08-07",
        })
    );
}

#[test]
fn test_audit_projection_is_guid_and_date_only() {
    let row = CandidateRow {
        guid: "G-123".to_string(),
        user_email: Some("a@x.com".to_string()),
        billing_id: None,
        shipping_id: None,
        date: date(),
    };

    let audit = row.audit();
    assert_eq!(
        audit,
        UsedGuidRow {
            guid: "G-123".to_string(),
            date: date(),
        }
    );
    assert_eq!(audit.to_row(), json!({"GUID": "G-123", "Date": "2026-08-07"}));
}
