//! End-to-end provisioning test against a live ClickHouse
//!
//! Requires a server at localhost:8123 (override with `GRAFT_TEST_URL`).
//!
//! ```bash
//! cargo test -p graft --test provision_integration -- --ignored
//! ```

use graft_config::{DestinationTables, SourceTables, TableRef};
use graft_provision::ProvisionJob;
use graft_warehouse::{ClickHouseConfig, ClickHouseWarehouse, Warehouse};

const TEST_DB: &str = "graft_integration";

fn test_url() -> String {
    std::env::var("GRAFT_TEST_URL").unwrap_or_else(|_| "http://localhost:8123".to_string())
}

fn test_job() -> ProvisionJob {
    ProvisionJob::new(
        SourceTables {
            dim_users: TableRef::new(TEST_DB, "dim_users"),
            sales_orders: TableRef::new(TEST_DB, "sales_orders"),
            subscriptions: TableRef::new(TEST_DB, "subscriptions"),
            guid_assignments: TableRef::new(TEST_DB, "guid_assignments"),
        },
        DestinationTables::default(),
    )
}

async fn seed_sources(admin: &ClickHouseWarehouse) {
    let statements = [
        format!("DROP DATABASE IF EXISTS {TEST_DB}"),
        format!("CREATE DATABASE {TEST_DB}"),
        format!(
            "CREATE TABLE {TEST_DB}.dim_users (Email String) \
             ENGINE = MergeTree() ORDER BY Email"
        ),
        format!(
            "CREATE TABLE {TEST_DB}.sales_orders (UserEmail String) \
             ENGINE = MergeTree() ORDER BY UserEmail"
        ),
        format!(
            "CREATE TABLE {TEST_DB}.subscriptions (email String) \
             ENGINE = MergeTree() ORDER BY email"
        ),
        format!(
            "CREATE TABLE {TEST_DB}.guid_assignments (UserEmail String, GUID String) \
             ENGINE = MergeTree() ORDER BY UserEmail"
        ),
        // a@x.com: in dim_users, no sales row, has a GUID -> selected
        // b@x.com: in dim_users and sales_orders -> excluded by the anti-join
        // c@x.com: in dim_users, no sales row, no GUID -> dropped by the inner join
        // d@x.com: subscription only -> selected via the second branch
        format!(
            "INSERT INTO {TEST_DB}.dim_users VALUES ('a@x.com'), ('b@x.com'), ('c@x.com')"
        ),
        format!("INSERT INTO {TEST_DB}.sales_orders VALUES ('b@x.com')"),
        format!("INSERT INTO {TEST_DB}.subscriptions VALUES ('d@x.com')"),
        format!(
            "INSERT INTO {TEST_DB}.guid_assignments VALUES \
             ('a@x.com', 'G-123'), ('d@x.com', 'G-789')"
        ),
    ];

    for sql in &statements {
        admin.execute(sql).await.expect(sql);
    }
}

#[tokio::test]
#[ignore = "requires a running ClickHouse"]
async fn test_end_to_end_provisioning() {
    let admin = ClickHouseWarehouse::connect(&ClickHouseConfig::new(test_url(), "default"))
        .await
        .expect("clickhouse not reachable");

    seed_sources(&admin).await;

    let warehouse = ClickHouseWarehouse::connect(&ClickHouseConfig::new(test_url(), TEST_DB))
        .await
        .unwrap();
    let job = test_job();

    // First run: creates the tables and loads both selected candidates.
    let report = job.run(&warehouse).await.unwrap();
    assert_eq!(report.tables_created.len(), 3);
    assert_eq!(report.candidates, 2);
    assert!(report.fully_succeeded());

    let rows = warehouse
        .fetch_rows(&format!(
            "SELECT GUID, UserEmail, BillingID, ShippingID FROM {TEST_DB}.customer_graph \
             ORDER BY GUID"
        ))
        .await
        .unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["GUID"], "G-123");
    assert_eq!(rows[0]["UserEmail"], "a@x.com");
    assert!(rows[0]["BillingID"].is_null());
    assert!(rows[0]["ShippingID"].is_null());
    assert_eq!(rows[1]["GUID"], "G-789");
    assert_eq!(rows[1]["UserEmail"], "d@x.com");

    let legacy = warehouse
        .fetch_rows(&format!(
            "SELECT GUID FROM {TEST_DB}.customer_graph_legacy ORDER BY GUID"
        ))
        .await
        .unwrap();
    assert_eq!(legacy.len(), 2);

    let used = warehouse
        .fetch_rows(&format!("SELECT GUID, Date FROM {TEST_DB}.used_guids ORDER BY GUID"))
        .await
        .unwrap();
    assert_eq!(used.len(), 2);
    assert_eq!(used[0]["GUID"], "G-123");
    assert!(used[0]["Date"].is_string());

    // Second run: creates are tolerated, rows append as duplicates.
    let report = job.run(&warehouse).await.unwrap();
    assert!(report.tables_created.is_empty());
    assert_eq!(report.candidates, 2);
    assert!(report.fully_succeeded());

    let rows = warehouse
        .fetch_rows(&format!("SELECT GUID FROM {TEST_DB}.customer_graph"))
        .await
        .unwrap();
    assert_eq!(rows.len(), 4);

    admin
        .execute(&format!("DROP DATABASE {TEST_DB}"))
        .await
        .unwrap();
}
