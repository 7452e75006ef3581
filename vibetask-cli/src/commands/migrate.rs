//! Schema migration command
//!
//! Creates the enum types and the `tasks` table, upgrades a table that only
//! has the legacy `completed` column, then prints the resulting layout and a
//! few tasks in list order.

use anyhow::{Context, Result};
use clap::Parser;

use vibetask_server::db::schema::{self, ColumnInfo};
use vibetask_server::db::{create_pool, PgTaskStore, TaskStore};
use vibetask_server::models::Task;
use vibetask_server::AppConfig;

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Database URL (overrides DB_* settings)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Number of sample tasks to print after migrating
    #[arg(long, default_value = "5")]
    pub sample: usize,
}

/// Run the migration and print a report
pub async fn run_migrate(args: MigrateArgs, mut config: AppConfig) -> Result<()> {
    if args.database_url.is_some() {
        config.database.url = args.database_url;
    }

    tracing::info!(database = %config.database.display_target(), "Connecting to PostgreSQL");
    let options = config
        .database
        .connect_options()
        .context("Invalid database settings")?;
    let pool = create_pool(options)
        .await
        .context("Failed to connect to database")?;

    schema::migrate(&pool).await.context("Migration failed")?;

    let columns = schema::describe_columns(&pool)
        .await
        .context("Failed to read table structure")?;
    println!("Table structure for tasks:");
    for column in &columns {
        println!("{}", format_column(column));
    }

    if args.sample > 0 {
        let store = PgTaskStore::new(pool.clone()).without_schema_management();
        let tasks = store.list_all().await.context("Failed to list tasks")?;

        println!();
        println!("Sample tasks ({} total):", tasks.len());
        for task in tasks.iter().take(args.sample) {
            println!("{}", format_task(task));
        }
    }

    pool.close().await;
    println!();
    println!("Migration complete");
    Ok(())
}

fn format_column(column: &ColumnInfo) -> String {
    let nullable = if column.nullable() { "nullable" } else { "not null" };
    format!("  - {}: {} ({})", column.column_name, column.data_type, nullable)
}

fn format_task(task: &Task) -> String {
    format!("  - [{}] {} ({})", task.priority, task.title, task.status)
}
