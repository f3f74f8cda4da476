//! The new-email candidate query
//!
//! Two branches unioned: users in the dimensional table with no sales
//! row, and subscription users absent from both the dimensional table and
//! the sales fact. The union is inner-joined against the GUID assignment
//! table, so candidates without an assigned GUID drop out. Every result
//! row is stamped with the processing date by the engine.
//!
//! Anti-joins are LEFT JOIN + IS NULL; `join_use_nulls` keeps non-matches
//! NULL instead of ClickHouse's default-value fill, which would defeat the
//! IS NULL filter.

use graft_config::SourceTables;

/// Build the candidate query for the configured source tables
pub fn candidate_query(sources: &SourceTables) -> String {
    let dim_users = sources.dim_users.qualified();
    let sales_orders = sources.sales_orders.qualified();
    let subscriptions = sources.subscriptions.qualified();
    let guid_assignments = sources.guid_assignments.qualified();

    format!(
        r#"WITH user_emails AS (
    SELECT DISTINCT
        du.Email AS UserEmail,
        CAST(NULL AS Nullable(String)) AS ShippingID,
        CAST(NULL AS Nullable(String)) AS BillingID
    FROM {dim_users} AS du
    LEFT JOIN {sales_orders} AS so
        ON du.Email = so.UserEmail
    WHERE so.UserEmail IS NULL

    UNION ALL

    SELECT DISTINCT
        us.email AS UserEmail,
        CAST(NULL AS Nullable(String)) AS ShippingID,
        CAST(NULL AS Nullable(String)) AS BillingID
    FROM {subscriptions} AS us
    LEFT JOIN {dim_users} AS du
        ON us.email = du.Email
    LEFT JOIN {sales_orders} AS so
        ON us.email = so.UserEmail
    WHERE so.UserEmail IS NULL AND du.Email IS NULL
)
SELECT
    ga.GUID AS GUID,
    ue.UserEmail AS UserEmail,
    ue.BillingID AS BillingID,
    ue.ShippingID AS ShippingID,
    today() AS Date
FROM user_emails AS ue
INNER JOIN {guid_assignments} AS ga
    ON ue.UserEmail = ga.UserEmail
SETTINGS join_use_nulls = 1"#
    )
}

#[cfg(test)]
#[path = "query_test.rs"]
mod query_test;
