//! In-memory task store
//!
//! Same ordering and defaulting rules as the PostgreSQL store, without a
//! database. Used by the HTTP tests and by `vibetask serve --in-memory`.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{DbError, TaskStore};
use crate::models::{NewTask, Task, TaskChanges, TaskId};

#[derive(Default)]
struct Inner {
    tasks: BTreeMap<TaskId, Task>,
    last_id: i64,
}

/// Task store backed by a map
#[derive(Default)]
pub struct MemoryTaskStore {
    inner: RwLock<Inner>,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn initialize(&self) -> Result<(), DbError> {
        tracing::debug!("Using in-memory task store");
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Task>, DbError> {
        let inner = self.inner.read().await;
        let mut tasks: Vec<Task> = inner.tasks.values().cloned().collect();
        tasks.sort_by_key(|t| (Reverse(t.priority), Reverse(t.created_at), Reverse(t.id)));
        Ok(tasks)
    }

    async fn get_by_id(&self, id: TaskId) -> Result<Option<Task>, DbError> {
        Ok(self.inner.read().await.tasks.get(&id).cloned())
    }

    async fn create(&self, task: NewTask) -> Result<Task, DbError> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;

        let now = Utc::now();
        let task = Task {
            id: TaskId::new(inner.last_id),
            title: task.title.into_string(),
            status: task.status,
            priority: task.priority,
            created_at: now,
            updated_at: now,
        };
        inner.tasks.insert(task.id, task.clone());
        Ok(task)
    }

    async fn update(&self, id: TaskId, changes: TaskChanges) -> Result<Option<Task>, DbError> {
        if changes.is_empty() {
            return self.get_by_id(id).await;
        }

        let mut inner = self.inner.write().await;
        let Some(task) = inner.tasks.get_mut(&id) else {
            return Ok(None);
        };

        changes.apply_to(task);
        task.updated_at = Utc::now().max(task.updated_at);
        Ok(Some(task.clone()))
    }

    async fn delete(&self, id: TaskId) -> Result<bool, DbError> {
        Ok(self.inner.write().await.tasks.remove(&id).is_some())
    }
}
