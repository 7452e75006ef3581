//! HTTP server command
//!
//! Connects to PostgreSQL, initializes the schema, then serves the task API
//! and the static front end until Ctrl+C / SIGTERM.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use vibetask_server::db::create_pool;
use vibetask_server::{run_server, AppConfig, MemoryTaskStore, PgTaskStore, ServerConfig, TaskStore};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (overrides HOST/PORT, default: 127.0.0.1:3000)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Directory with the front-end files (overrides STATIC_DIR)
    #[arg(long)]
    pub static_dir: Option<PathBuf>,

    /// Allow permissive CORS (all origins) even in production mode
    #[arg(long)]
    pub cors_permissive: bool,

    /// Keep tasks in memory instead of PostgreSQL (lost on exit)
    #[arg(long)]
    pub in_memory: bool,

    /// Only check connectivity at startup; leave the schema alone
    #[arg(long)]
    pub skip_migrations: bool,

    /// Database URL (overrides DB_* settings)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs, mut config: AppConfig) -> Result<()> {
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(dir) = args.static_dir {
        config.static_dir = dir;
    }
    if args.database_url.is_some() {
        config.database.url = args.database_url;
    }

    let mut server_config = ServerConfig::from(&config);
    server_config.cors_permissive |= args.cors_permissive;

    tracing::info!(mode = %config.mode, "Starting vibetask server on {}", config.bind_addr);

    let store: Arc<dyn TaskStore> = if args.in_memory {
        tracing::warn!("Using in-memory store - tasks are lost on exit");
        Arc::new(MemoryTaskStore::new())
    } else {
        tracing::info!(database = %config.database.display_target(), "Connecting to PostgreSQL");
        let options = config
            .database
            .connect_options()
            .context("Invalid database settings")?;
        let pool = create_pool(options)
            .await
            .context("Failed to create database pool")?;

        let store = PgTaskStore::new(pool);
        if args.skip_migrations {
            Arc::new(store.without_schema_management())
        } else {
            Arc::new(store)
        }
    };

    // Initializes the store before binding; blocks until shutdown
    run_server(store, server_config)
        .await
        .context("Server error")?;

    Ok(())
}
