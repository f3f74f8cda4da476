//! Run command
//!
//! Executes the provisioning workflow: ensure tables, query candidates,
//! fan out inserts.
//!
//! # Usage
//!
//! ```bash
//! graft run --config configs/graft.toml
//! graft run --dry-run                      # preview DDL and query
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Args;
use owo_colors::OwoColorize;

use graft_config::Config;
use graft_provision::{ProvisionJob, RunReport};
use graft_warehouse::{ClickHouseConfig, ClickHouseWarehouse};

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Show the DDL and candidate query without executing
    #[arg(long)]
    pub dry_run: bool,
}

pub async fn run(args: RunArgs) -> Result<()> {
    let config = load_config(args.config.as_ref())?;
    let job = ProvisionJob::from_config(&config);

    // Print header
    println!();
    println!("{}", "Graft Provision".bold());
    println!("{}", "─".repeat(50));
    println!("Warehouse     {}", config.warehouse.url.dimmed());
    println!("Database      {}", config.warehouse.database.cyan());
    println!(
        "Destinations  {}, {}, {}",
        config.destinations.customer_graph.cyan(),
        config.destinations.customer_graph_legacy.cyan(),
        config.destinations.used_guids.cyan()
    );
    println!("{}", "─".repeat(50));
    println!();

    if args.dry_run {
        print_dry_run(&job, &config);
        return Ok(());
    }

    // Connect to the warehouse
    print!("Connecting to warehouse... ");
    let warehouse = connect(&config).await?;
    println!("{}", "✓".green());

    let report = job.run(&warehouse).await?;

    print_report(&report);

    // Partial insert failure is reported, not fatal: the exit code only
    // reflects uncaught errors.
    Ok(())
}

/// Load config from the given path, or from the default locations
pub fn load_config(config_path: Option<&PathBuf>) -> Result<Config> {
    if let Some(path) = config_path {
        if !path.exists() {
            bail!("config file not found: {}", path.display());
        }
        return Config::from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()));
    }

    for candidate in ["configs/graft.toml", "graft.toml"] {
        let path = PathBuf::from(candidate);
        if path.exists() {
            return Config::from_file(&path)
                .with_context(|| format!("failed to load config from {}", path.display()));
        }
    }

    bail!("no config file found (pass --config or create configs/graft.toml)");
}

/// Build the warehouse handle and test the connection
pub async fn connect(config: &Config) -> Result<ClickHouseWarehouse> {
    let mut warehouse_config =
        ClickHouseConfig::new(&config.warehouse.url, &config.warehouse.database);

    if let (Some(user), Some(pass)) = (&config.warehouse.username, &config.warehouse.password) {
        warehouse_config = warehouse_config.with_credentials(user, pass);
    }

    ClickHouseWarehouse::connect(&warehouse_config)
        .await
        .context("failed to connect to warehouse")
}

fn print_report(report: &RunReport) {
    println!();
    if report.tables_created.is_empty() {
        println!("Tables        (all existed)");
    } else {
        println!("Tables        created {}", report.tables_created.join(", "));
    }
    println!("Candidates    {}", report.candidates);
    println!();

    for outcome in &report.outcomes {
        if outcome.ok() {
            println!(
                "  {} {} ({} rows)",
                "✓".green(),
                outcome.table,
                outcome.rows
            );
        } else if let Some(error) = &outcome.error {
            println!("  {} {} - {}", "✗".red(), outcome.table, error.red());
        } else {
            println!(
                "  {} {} - {} row(s) rejected",
                "!".yellow(),
                outcome.table,
                outcome.row_errors.len()
            );
            for e in &outcome.row_errors {
                println!("      {}", e.to_string().yellow());
            }
        }
    }

    println!();
    if report.fully_succeeded() {
        println!("{}", "Provisioning complete!".green().bold());
    } else {
        println!("{}", "Provisioning finished with errors (see above).".yellow());
    }
    println!();
}

fn print_dry_run(job: &ProvisionJob, config: &Config) {
    println!("{}", "[DRY RUN] Would execute:".yellow().bold());
    println!();

    println!("-- Create tables");
    for def in job.destination_defs() {
        println!("{};", def.create_ddl(&config.warehouse.database));
        println!();
    }

    println!("-- Candidate query");
    println!("{};", job.query());
    println!();
}
