//! Check command
//!
//! Validates that the destination tables exist without mutating anything.
//!
//! # Usage
//!
//! ```bash
//! graft check --config configs/graft.toml
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use owo_colors::OwoColorize;

use graft_warehouse::Warehouse;

use super::run::{connect, load_config};

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

pub async fn run(args: CheckArgs) -> Result<()> {
    let config = load_config(args.config.as_ref())?;

    println!();
    println!("{}", "Graft Check".bold());
    println!("{}", "─".repeat(50));
    println!("Warehouse     {}", config.warehouse.url.dimmed());
    println!("Database      {}", config.warehouse.database.cyan());
    println!("{}", "─".repeat(50));
    println!();

    // Connect to the warehouse
    print!("Connecting to warehouse... ");
    let warehouse = match connect(&config).await {
        Ok(w) => {
            println!("{}", "✓".green());
            w
        }
        Err(e) => {
            println!("{}", "✗".red());
            println!("  {}", e.to_string().red());
            return Err(e);
        }
    };

    if let Ok(version) = warehouse.version().await {
        println!("  Version: {}", version.dimmed());
    }

    let mut all_ok = true;

    println!("Tables:");
    for table in [
        &config.destinations.customer_graph,
        &config.destinations.customer_graph_legacy,
        &config.destinations.used_guids,
    ] {
        print!("  {}... ", table);
        if warehouse.table_exists(table).await? {
            println!("{}", "✓".green());
        } else {
            println!("{}", "✗ not found".red());
            all_ok = false;
        }
    }

    println!();

    if all_ok {
        println!("{}", "All checks passed!".green().bold());
    } else {
        println!(
            "{}",
            "Some tables are missing. Run 'graft run' to provision.".yellow()
        );
    }

    println!();

    Ok(())
}
