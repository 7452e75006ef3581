//! Partial task updates
//!
//! `TaskPatch` is what clients send; `TaskChanges` is what the store applies.
//! The conversion between them is where the legacy `completed` flag is
//! translated into a `status`. Once no client sends `completed` any more,
//! drop the field from `TaskPatch` and the translation goes with it.

use serde::Deserialize;

use super::{Task, TaskPriority, TaskStatus, TaskTitle, ValidationError};

/// Update request body: any subset of the mutable fields
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub status: Option<TaskStatus>,
    #[serde(default)]
    pub priority: Option<TaskPriority>,
    /// Legacy boolean from clients predating `status`
    #[serde(default)]
    pub completed: Option<bool>,
}

impl TaskPatch {
    /// Validate the patch and resolve the legacy flag.
    ///
    /// When both `status` and `completed` are present, `completed` wins.
    pub fn into_changes(self) -> Result<TaskChanges, ValidationError> {
        let title = self.title.as_deref().map(TaskTitle::new).transpose()?;
        let status = match self.completed {
            Some(completed) => Some(TaskStatus::from_completed(completed)),
            None => self.status,
        };

        Ok(TaskChanges {
            title,
            status,
            priority: self.priority,
        })
    }
}

/// Validated set of columns to change. `None` means "leave untouched".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    pub title: Option<TaskTitle>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
}

impl TaskChanges {
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.status.is_none() && self.priority.is_none()
    }

    /// Apply the present fields to an in-memory task (timestamps excluded)
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.as_str().to_owned();
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
    }
}
