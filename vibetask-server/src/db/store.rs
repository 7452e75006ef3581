//! Storage abstraction shared by the PostgreSQL and in-memory backends

use async_trait::async_trait;

use crate::models::{NewTask, Task, TaskChanges, TaskId};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("invalid {column} value '{value}' in task {id}")]
    InvalidValue {
        column: &'static str,
        id: i64,
        value: String,
    },
}

/// Task persistence.
///
/// A missing id is never an error: lookups return `Ok(None)` and deletes
/// return `Ok(false)`.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Verify connectivity and prepare the schema. Calling it again after a
    /// success is a no-op.
    async fn initialize(&self) -> Result<(), DbError>;

    /// All tasks, `High` priority first, newest first within a priority.
    async fn list_all(&self) -> Result<Vec<Task>, DbError>;

    async fn get_by_id(&self, id: TaskId) -> Result<Option<Task>, DbError>;

    async fn create(&self, task: NewTask) -> Result<Task, DbError>;

    /// Apply only the present fields and refresh `updated_at`.
    ///
    /// An empty change set is a plain read.
    async fn update(&self, id: TaskId, changes: TaskChanges) -> Result<Option<Task>, DbError>;

    /// Hard delete. Returns whether a row was removed.
    async fn delete(&self, id: TaskId) -> Result<bool, DbError>;
}
