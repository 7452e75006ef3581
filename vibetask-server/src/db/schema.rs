//! Schema creation and the completed → status/priority migration
//!
//! Every step is idempotent, so this runs on each startup. A table created
//! before the enum columns existed is upgraded in place: rows with only the
//! legacy `completed` flag get `Done` / `To Do`, and `priority` is backfilled
//! to `Medium`. Rows that already carry a status are never rewritten.
//!
//! The whole migration runs in one transaction.

use serde::Serialize;
use sqlx::{FromRow, PgPool};

use super::DbError;

const STEPS: &[(&str, &str)] = &[
    (
        "create task_status_enum",
        r#"
        DO $$ BEGIN
            CREATE TYPE task_status_enum AS ENUM (
                'To Do',
                'In Progress',
                'On Hold',
                'Done',
                'Canceled'
            );
        EXCEPTION
            WHEN duplicate_object THEN null;
        END $$
        "#,
    ),
    (
        "create task_priority_enum",
        r#"
        DO $$ BEGIN
            CREATE TYPE task_priority_enum AS ENUM ('Low', 'Medium', 'High');
        EXCEPTION
            WHEN duplicate_object THEN null;
        END $$
        "#,
    ),
    (
        "create tasks table",
        r#"
        CREATE TABLE IF NOT EXISTS tasks (
            id SERIAL PRIMARY KEY,
            title VARCHAR(255) NOT NULL,
            completed BOOLEAN NOT NULL DEFAULT FALSE,
            status task_status_enum NOT NULL DEFAULT 'To Do',
            priority task_priority_enum NOT NULL DEFAULT 'Medium',
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    ),
    // Legacy tables: add the columns without defaults so existing rows stay
    // NULL until the backfill below derives them from `completed`.
    (
        "add status and priority columns",
        r#"
        ALTER TABLE tasks
            ADD COLUMN IF NOT EXISTS completed BOOLEAN DEFAULT FALSE,
            ADD COLUMN IF NOT EXISTS status task_status_enum,
            ADD COLUMN IF NOT EXISTS priority task_priority_enum
        "#,
    ),
    (
        "backfill status from completed",
        r#"
        UPDATE tasks
        SET status = CASE
            WHEN completed THEN 'Done'::task_status_enum
            ELSE 'To Do'::task_status_enum
        END
        WHERE status IS NULL
        "#,
    ),
    (
        "backfill priority",
        "UPDATE tasks SET priority = 'Medium'::task_priority_enum WHERE priority IS NULL",
    ),
    (
        "set column defaults",
        r#"
        ALTER TABLE tasks
            ALTER COLUMN status SET DEFAULT 'To Do',
            ALTER COLUMN status SET NOT NULL,
            ALTER COLUMN priority SET DEFAULT 'Medium',
            ALTER COLUMN priority SET NOT NULL
        "#,
    ),
    (
        "index status",
        "CREATE INDEX IF NOT EXISTS idx_tasks_status ON tasks(status)",
    ),
    (
        "index priority",
        "CREATE INDEX IF NOT EXISTS idx_tasks_priority ON tasks(priority)",
    ),
    (
        "index status and priority",
        "CREATE INDEX IF NOT EXISTS idx_tasks_status_priority ON tasks(status, priority)",
    ),
];

/// Run all schema steps
pub async fn migrate(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Running task schema migration...");

    let mut tx = pool.begin().await?;
    for (name, sql) in STEPS {
        let result = sqlx::query(sql).execute(&mut *tx).await?;
        tracing::debug!(step = name, rows = result.rows_affected(), "migration step applied");
    }
    tx.commit().await?;

    tracing::info!("Task schema migration complete");
    Ok(())
}

/// One column of the `tasks` table, as reported by information_schema
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ColumnInfo {
    pub column_name: String,
    pub data_type: String,
    pub is_nullable: String,
    pub column_default: Option<String>,
}

impl ColumnInfo {
    pub fn nullable(&self) -> bool {
        self.is_nullable == "YES"
    }
}

/// Describe the `tasks` table columns in ordinal order
pub async fn describe_columns(pool: &PgPool) -> Result<Vec<ColumnInfo>, DbError> {
    let columns: Vec<ColumnInfo> = sqlx::query_as(
        r#"
        SELECT
            column_name::text AS column_name,
            data_type::text AS data_type,
            is_nullable::text AS is_nullable,
            column_default::text AS column_default
        FROM information_schema.columns
        WHERE table_name = 'tasks'
        ORDER BY ordinal_position
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(columns)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backfill_only_touches_unmigrated_rows() {
        for (name, sql) in STEPS {
            if sql.trim_start().starts_with("UPDATE") {
                assert!(sql.contains("IS NULL"), "step '{}' must be idempotent", name);
            }
        }
    }

    #[test]
    fn legacy_columns_added_without_defaults() {
        let (_, sql) = STEPS
            .iter()
            .find(|(name, _)| *name == "add status and priority columns")
            .unwrap();
        assert!(sql.contains("ADD COLUMN IF NOT EXISTS status task_status_enum,"));
        assert!(!sql.contains("DEFAULT 'To Do'"));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn migrate_legacy_table_is_idempotent() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = PgPool::connect(&url).await.expect("connect failed");

        sqlx::query("DROP TABLE IF EXISTS tasks").execute(&pool).await.unwrap();
        sqlx::query(
            r#"
            CREATE TABLE tasks (
                id SERIAL PRIMARY KEY,
                title VARCHAR(255) NOT NULL,
                completed BOOLEAN DEFAULT FALSE,
                created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
                updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
            )
            "#,
        )
        .execute(&pool)
        .await
        .unwrap();
        sqlx::query("INSERT INTO tasks (title, completed) VALUES ('old done', true), ('old open', false)")
            .execute(&pool)
            .await
            .unwrap();

        migrate(&pool).await.unwrap();
        migrate(&pool).await.unwrap();

        let rows: Vec<(String, String, String)> = sqlx::query_as(
            "SELECT title::text, status::text, priority::text FROM tasks ORDER BY id",
        )
        .fetch_all(&pool)
        .await
        .unwrap();

        assert_eq!(
            rows,
            vec![
                ("old done".into(), "Done".into(), "Medium".into()),
                ("old open".into(), "To Do".into(), "Medium".into()),
            ]
        );

        let columns = describe_columns(&pool).await.unwrap();
        let status = columns.iter().find(|c| c.column_name == "status").unwrap();
        assert!(!status.nullable());
    }
}
