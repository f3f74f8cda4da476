//! graft - customer-graph provisioning utility
//!
//! Provisions the customer-graph tables in the warehouse and seeds them
//! with GUIDs resolved for new user emails.
//!
//! # Usage
//!
//! ```bash
//! # Run the provisioning workflow (default)
//! graft --config configs/graft.toml
//! graft run --config configs/graft.toml
//! graft run --dry-run
//!
//! # Verify the destination tables exist
//! graft check --config configs/graft.toml
//! ```

mod cmd;

use anyhow::Result;
use clap::{Parser, Subcommand};
use graft_config::Config;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// graft - customer-graph provisioning utility
#[derive(Parser, Debug)]
#[command(name = "graft")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    // Global args that apply to run when no subcommand given
    /// Path to configuration file (error if specified but not found)
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,

    /// Log level (trace, debug, info, warn, error). Overrides config file.
    #[arg(short, long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Provision the destination tables and load new GUIDs
    Run(cmd::run::RunArgs),

    /// Check that the destination tables exist
    Check(cmd::check::CheckArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        // Explicit subcommand
        Some(Command::Run(mut args)) => {
            // CLI global --config overrides subcommand config if both specified
            if args.config.is_none() && cli.config.is_some() {
                args.config = cli.config;
            }
            let log_level = resolve_log_level(cli.log_level.as_deref(), args.config.as_deref());
            init_logging(&log_level)?;
            cmd::run::run(args).await
        }
        Some(Command::Check(mut args)) => {
            if args.config.is_none() && cli.config.is_some() {
                args.config = cli.config;
            }
            // Check doesn't need logging - just outputs to stdout
            cmd::check::run(args).await
        }
        // No subcommand = run the workflow (default behavior)
        None => {
            let log_level = resolve_log_level(cli.log_level.as_deref(), cli.config.as_deref());
            init_logging(&log_level)?;
            let args = cmd::run::RunArgs {
                config: cli.config,
                dry_run: false,
            };
            cmd::run::run(args).await
        }
    }
}

/// Resolve log level: CLI flag > config file > default "info"
fn resolve_log_level(cli_level: Option<&str>, config_path: Option<&std::path::Path>) -> String {
    // CLI flag takes precedence
    if let Some(level) = cli_level {
        return level.to_string();
    }

    // Try to load from config file if specified
    if let Some(path) = config_path
        && path.exists()
        && let Ok(config) = Config::from_file(path)
    {
        return config.log.level.as_str().to_string();
    }

    // Default
    "info".to_string()
}

/// Initialize the tracing subscriber for logging
fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(level)
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(|e| anyhow::anyhow!("invalid log level: {}", e))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .with(filter)
        .init();

    Ok(())
}
