//! The provisioning job
//!
//! Sequential, single-shot. Holds no state beyond its configuration; all
//! warehouse access goes through the [`Warehouse`] seam.

use serde_json::Value;

use graft_config::{Config, DestinationTables, SourceTables};
use graft_warehouse::{RowError, TableDef, Warehouse};

use crate::error::ProvisionError;
use crate::query::candidate_query;
use crate::rows::CandidateRow;
use crate::schema::{audit_table, graph_table};

/// The customer-graph provisioning job
#[derive(Debug, Clone)]
pub struct ProvisionJob {
    sources: SourceTables,
    destinations: DestinationTables,
}

impl ProvisionJob {
    /// Create a job from source and destination configuration
    pub fn new(sources: SourceTables, destinations: DestinationTables) -> Self {
        Self {
            sources,
            destinations,
        }
    }

    /// Create a job from a loaded config
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.sources.clone(), config.destinations.clone())
    }

    /// The three destination table definitions, in write order
    pub fn destination_defs(&self) -> Vec<TableDef> {
        vec![
            graph_table(&self.destinations.customer_graph),
            graph_table(&self.destinations.customer_graph_legacy),
            audit_table(&self.destinations.used_guids),
        ]
    }

    /// The candidate query this job will submit
    pub fn query(&self) -> String {
        candidate_query(&self.sources)
    }

    /// Run the workflow: ensure tables, query candidates, fan out inserts
    ///
    /// Table-creation failures and insert failures are logged and carried
    /// in the report; only a query/decode failure aborts the run.
    pub async fn run(&self, warehouse: &dyn Warehouse) -> Result<RunReport, ProvisionError> {
        // Step 1: ensure destination tables. After the first run every
        // create fails with already-exists; that is the steady state.
        let mut tables_created = Vec::new();
        for def in self.destination_defs() {
            match warehouse.create_table(&def).await {
                Ok(()) => {
                    tracing::info!(table = %def.name, "table created");
                    tables_created.push(def.name.clone());
                }
                Err(e) if e.is_already_exists() => {
                    tracing::info!(table = %def.name, "table already exists");
                }
                Err(e) => {
                    tracing::warn!(table = %def.name, error = %e, "table creation failed");
                }
            }
        }

        // Step 2: identify new emails. Failure here terminates the run.
        let sql = self.query();
        let fetched = warehouse
            .fetch_rows(&sql)
            .await
            .map_err(ProvisionError::Query)?;

        let candidates = fetched
            .into_iter()
            .map(CandidateRow::from_row)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!(candidates = candidates.len(), "candidate query finished");

        // Step 3: fan out. The full rows go to both graph tables, the
        // GUID+Date projection to the audit table. A failed table never
        // blocks the ones after it.
        let graph_rows: Vec<Value> = candidates.iter().map(CandidateRow::to_row).collect();
        let audit_rows: Vec<Value> = candidates.iter().map(|c| c.audit().to_row()).collect();

        let mut outcomes = Vec::with_capacity(3);
        for (def, rows) in [
            (graph_table(&self.destinations.customer_graph), &graph_rows),
            (
                graph_table(&self.destinations.customer_graph_legacy),
                &graph_rows,
            ),
            (audit_table(&self.destinations.used_guids), &audit_rows),
        ] {
            outcomes.push(insert_into(warehouse, &def, rows).await);
        }

        Ok(RunReport {
            tables_created,
            candidates: candidates.len(),
            outcomes,
        })
    }
}

/// Insert one table's batch, folding every failure into the outcome
async fn insert_into(warehouse: &dyn Warehouse, def: &TableDef, rows: &[Value]) -> TableOutcome {
    match warehouse.insert_rows(def, rows).await {
        Ok(row_errors) => {
            if row_errors.is_empty() {
                tracing::info!(table = %def.name, rows = rows.len(), "rows inserted");
            } else {
                for e in &row_errors {
                    tracing::warn!(table = %def.name, error = %e, "row rejected");
                }
            }
            TableOutcome {
                table: def.name.clone(),
                rows: rows.len(),
                row_errors,
                error: None,
            }
        }
        Err(e) => {
            tracing::warn!(table = %def.name, error = %e, "insert failed");
            TableOutcome {
                table: def.name.clone(),
                rows: rows.len(),
                row_errors: Vec::new(),
                error: Some(e.to_string()),
            }
        }
    }
}

/// What happened to one destination table
#[derive(Debug, Clone)]
pub struct TableOutcome {
    /// Destination table name
    pub table: String,

    /// Rows submitted
    pub rows: usize,

    /// Row-level rejections reported by the warehouse
    pub row_errors: Vec<RowError>,

    /// Table-level failure, when the insert never completed
    pub error: Option<String>,
}

impl TableOutcome {
    /// Whether every submitted row was accepted
    pub fn ok(&self) -> bool {
        self.row_errors.is_empty() && self.error.is_none()
    }
}

/// Summary of one provisioning run
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Tables created by this run (empty in the steady state)
    pub tables_created: Vec<String>,

    /// Candidates returned by the query
    pub candidates: usize,

    /// Per-table insert outcomes, in write order
    pub outcomes: Vec<TableOutcome>,
}

impl RunReport {
    /// Whether every insert fully succeeded
    pub fn fully_succeeded(&self) -> bool {
        self.outcomes.iter().all(TableOutcome::ok)
    }
}

#[cfg(test)]
#[path = "job_test.rs"]
mod job_test;
