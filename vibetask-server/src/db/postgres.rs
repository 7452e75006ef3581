//! PostgreSQL-backed task store

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use sqlx::PgPool;

use super::repos::TaskRepo;
use super::{schema, DbError, TaskStore};
use crate::models::{NewTask, Task, TaskChanges, TaskId};

/// Task store owning the process-wide connection pool
pub struct PgTaskStore {
    pool: PgPool,
    manage_schema: bool,
    initialized: AtomicBool,
}

impl PgTaskStore {
    /// Store that creates and migrates the schema on `initialize()`
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            manage_schema: true,
            initialized: AtomicBool::new(false),
        }
    }

    /// Only check connectivity on `initialize()`; the schema is managed
    /// elsewhere (e.g. `vibetask migrate`).
    pub fn without_schema_management(mut self) -> Self {
        self.manage_schema = false;
        self
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl TaskStore for PgTaskStore {
    async fn initialize(&self) -> Result<(), DbError> {
        // Runs once at startup, before the listener is bound.
        if self.initialized.load(Ordering::Acquire) {
            return Ok(());
        }

        sqlx::query("SELECT 1").execute(&self.pool).await?;
        if self.manage_schema {
            schema::migrate(&self.pool).await?;
        }

        self.initialized.store(true, Ordering::Release);
        tracing::info!(manage_schema = self.manage_schema, "Database connection established");
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Task>, DbError> {
        TaskRepo::new(&self.pool).list().await
    }

    async fn get_by_id(&self, id: TaskId) -> Result<Option<Task>, DbError> {
        TaskRepo::new(&self.pool).get(id).await
    }

    async fn create(&self, task: NewTask) -> Result<Task, DbError> {
        TaskRepo::new(&self.pool).create(&task).await
    }

    async fn update(&self, id: TaskId, changes: TaskChanges) -> Result<Option<Task>, DbError> {
        TaskRepo::new(&self.pool).update(id, &changes).await
    }

    async fn delete(&self, id: TaskId) -> Result<bool, DbError> {
        TaskRepo::new(&self.pool).delete(id).await
    }
}
