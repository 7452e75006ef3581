//! vibetask CLI - task-tracking backend
//!
//! This is the main entry point for the `vibetask` binary, which provides:
//! - The HTTP API server (`serve`)
//! - The completed → status/priority schema migration (`migrate`)
//! - A `.env` template generator (`init-env`)
//!
//! Settings come from the environment, after an optional `.env` in the
//! working directory is loaded.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use vibetask_server::AppConfig;

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "vibetask",
    author,
    version,
    about = "Task-tracking API server backed by PostgreSQL",
    long_about = "Serve the VibeTask REST API and front end, migrate the task schema, \
                  or generate a .env template with every recognized setting."
)]
struct Cli {
    /// Enable debug logging (RUST_LOG still takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server (initializes the database first)
    Serve(commands::serve::ServeArgs),
    /// Create or upgrade the tasks schema and print a report
    Migrate(commands::migrate::MigrateArgs),
    /// Write a .env template with default settings
    InitEnv(commands::init_env::InitEnvArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Missing .env is fine; the environment alone is enough.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();

    match cli.command {
        Commands::Serve(args) => {
            let config = AppConfig::from_env().context("Invalid configuration")?;
            commands::run_serve(args, config).await?
        }
        Commands::Migrate(args) => {
            let config = AppConfig::from_env().context("Invalid configuration")?;
            commands::run_migrate(args, config).await?
        }
        Commands::InitEnv(args) => commands::run_init_env(args)?,
    }
    Ok(())
}
