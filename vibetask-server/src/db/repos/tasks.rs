//! Task repository
//!
//! One statement per operation:
//! - list: priority rank via CASE, then newest first
//! - update: SET list assembled from the fields actually present
//! - delete: hard delete, row count tells whether the id existed

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

use crate::db::DbError;
use crate::models::{NewTask, Task, TaskChanges, TaskId, TaskPriority, TaskStatus};

/// Column list shared by every statement that returns tasks.
///
/// Casts keep decoding uniform for tables created before the enum
/// migration (`SERIAL` ids, `TIMESTAMP` without time zone).
const TASK_COLUMNS: &str = "id::bigint AS id, title, status::text AS status, \
     priority::text AS priority, created_at::timestamptz AS created_at, \
     updated_at::timestamptz AS updated_at";

/// Raw task row
#[derive(Debug, Clone, FromRow)]
pub struct TaskRow {
    pub id: i64,
    pub title: String,
    pub status: String,
    pub priority: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<TaskRow> for Task {
    type Error = DbError;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<TaskStatus>()
            .map_err(|_| DbError::InvalidValue {
                column: "status",
                id: row.id,
                value: row.status.clone(),
            })?;
        let priority = row
            .priority
            .parse::<TaskPriority>()
            .map_err(|_| DbError::InvalidValue {
                column: "priority",
                id: row.id,
                value: row.priority.clone(),
            })?;

        Ok(Task {
            id: TaskId::new(row.id),
            title: row.title,
            status,
            priority,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Build the partial UPDATE for `changes`.
///
/// Columns and binds are pushed together, so placeholders always line up
/// with parameters. Setting `status` also rewrites the legacy `completed`
/// column. Callers must not pass an empty change set.
pub fn build_update(id: TaskId, changes: &TaskChanges) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("UPDATE tasks SET ");

    {
        let mut set = qb.separated(", ");
        if let Some(title) = &changes.title {
            set.push("title = ")
                .push_bind_unseparated(title.as_str().to_owned());
        }
        if let Some(status) = changes.status {
            set.push("status = ")
                .push_bind_unseparated(status.as_str())
                .push_unseparated("::task_status_enum");
            set.push("completed = ")
                .push_bind_unseparated(status.is_done());
        }
        if let Some(priority) = changes.priority {
            set.push("priority = ")
                .push_bind_unseparated(priority.as_str())
                .push_unseparated("::task_priority_enum");
        }
        set.push("updated_at = NOW()");
    }

    qb.push(" WHERE id = ").push_bind(id.get());
    qb.push(" RETURNING ").push(TASK_COLUMNS);
    qb
}

/// Task repository
pub struct TaskRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> TaskRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Task>, DbError> {
        let sql = format!(
            r#"
            SELECT {TASK_COLUMNS}
            FROM tasks
            ORDER BY
                CASE priority
                    WHEN 'High' THEN 1
                    WHEN 'Medium' THEN 2
                    WHEN 'Low' THEN 3
                END,
                created_at DESC,
                id DESC
            "#
        );

        let rows: Vec<TaskRow> = sqlx::query_as(&sql).fetch_all(self.pool).await?;
        rows.into_iter().map(Task::try_from).collect()
    }

    pub async fn get(&self, id: TaskId) -> Result<Option<Task>, DbError> {
        let sql = format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1");

        let row: Option<TaskRow> = sqlx::query_as(&sql)
            .bind(id.get())
            .fetch_optional(self.pool)
            .await?;
        row.map(Task::try_from).transpose()
    }

    pub async fn create(&self, task: &NewTask) -> Result<Task, DbError> {
        let sql = format!(
            r#"
            INSERT INTO tasks (title, status, priority, completed)
            VALUES ($1, $2::task_status_enum, $3::task_priority_enum, $4)
            RETURNING {TASK_COLUMNS}
            "#
        );

        let row: TaskRow = sqlx::query_as(&sql)
            .bind(task.title.as_str())
            .bind(task.status.as_str())
            .bind(task.priority.as_str())
            .bind(task.status.is_done())
            .fetch_one(self.pool)
            .await?;
        Task::try_from(row)
    }

    pub async fn update(&self, id: TaskId, changes: &TaskChanges) -> Result<Option<Task>, DbError> {
        if changes.is_empty() {
            return self.get(id).await;
        }

        let mut qb = build_update(id, changes);
        let row: Option<TaskRow> = qb
            .build_query_as::<TaskRow>()
            .fetch_optional(self.pool)
            .await?;
        row.map(Task::try_from).transpose()
    }

    pub async fn delete(&self, id: TaskId) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id.get())
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
