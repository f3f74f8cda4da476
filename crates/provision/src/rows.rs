//! Row types for the destination tables

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::error::ProvisionError;

/// One candidate produced by the query: a new user email with its
/// resolved GUID, stamped with the processing date
///
/// BillingID and ShippingID are carried as placeholder nulls; the query
/// never fills them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRow {
    /// Assigned customer GUID
    #[serde(rename = "GUID")]
    pub guid: String,

    /// Candidate email
    #[serde(rename = "UserEmail")]
    pub user_email: Option<String>,

    /// Billing identifier (always null in this query)
    #[serde(rename = "BillingID")]
    pub billing_id: Option<String>,

    /// Shipping identifier (always null in this query)
    #[serde(rename = "ShippingID")]
    pub shipping_id: Option<String>,

    /// Processing date stamped by the engine
    #[serde(rename = "Date")]
    pub date: NaiveDate,
}

impl CandidateRow {
    /// Decode a fetched result row
    pub fn from_row(row: Map<String, Value>) -> Result<Self, ProvisionError> {
        serde_json::from_value(Value::Object(row)).map_err(|e| ProvisionError::Decode {
            message: e.to_string(),
        })
    }

    /// Serialize for insertion into a customer-graph table
    ///
    /// Dates are rendered as ISO-8601 calendar strings.
    pub fn to_row(&self) -> Value {
        json!({
            "GUID": self.guid,
            "UserEmail": self.user_email,
            "BillingID": self.billing_id,
            "ShippingID": self.shipping_id,
            "Date": self.date.to_string(),
        })
    }

    /// Project down to the used-GUID audit record
    pub fn audit(&self) -> UsedGuidRow {
        UsedGuidRow {
            guid: self.guid.clone(),
            date: self.date,
        }
    }
}

/// Append-only record of a consumed GUID
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsedGuidRow {
    /// Consumed customer GUID
    #[serde(rename = "GUID")]
    pub guid: String,

    /// Date the GUID was consumed
    #[serde(rename = "Date")]
    pub date: NaiveDate,
}

impl UsedGuidRow {
    /// Serialize for insertion into the audit table
    pub fn to_row(&self) -> Value {
        json!({
            "GUID": self.guid,
            "Date": self.date.to_string(),
        })
    }
}

#[cfg(test)]
#[path = "rows_test.rs"]
mod rows_test;
