//! Task domain types
//!
//! `TaskStatus` and `TaskPriority` are closed sets; their string forms match
//! the labels of the `task_status_enum` / `task_priority_enum` database types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Maximum title length, matching the `VARCHAR(255)` column
pub const MAX_TITLE_LEN: usize = 255;

/// Store-assigned task identifier.
///
/// Stored as a `SERIAL`, exposed as text at the HTTP boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(i64);

impl TaskId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TaskId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// Validated task title: trimmed, non-empty, no control characters other
/// than tab, at most 255 characters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Create a title from raw user input.
    ///
    /// Surrounding whitespace is removed before validation, so `"   "` is
    /// rejected as empty and `"  Buy milk "` becomes `"Buy milk"`.
    ///
    /// # Example
    /// ```
    /// use vibetask_server::models::TaskTitle;
    ///
    /// assert_eq!(TaskTitle::new("  Buy milk ").unwrap().as_str(), "Buy milk");
    /// assert!(TaskTitle::new("   ").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "title" });
        }

        // Tabs are the only control character a title may keep; NUL in
        // particular is rejected by PostgreSQL text columns.
        if trimmed.chars().any(|c| c.is_control() && c != '\t') {
            return Err(ValidationError::InvalidCharacters { field: "title" });
        }

        if trimmed.chars().count() > MAX_TITLE_LEN {
            return Err(ValidationError::TooLong {
                field: "title",
                max: MAX_TITLE_LEN,
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for TaskTitle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Workflow status of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TaskStatus {
    #[default]
    #[serde(rename = "To Do")]
    ToDo,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "On Hold")]
    OnHold,
    #[serde(rename = "Done")]
    Done,
    #[serde(rename = "Canceled")]
    Canceled,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ToDo => "To Do",
            Self::InProgress => "In Progress",
            Self::OnHold => "On Hold",
            Self::Done => "Done",
            Self::Canceled => "Canceled",
        }
    }

    pub fn all() -> &'static [Self] {
        &[
            Self::ToDo,
            Self::InProgress,
            Self::OnHold,
            Self::Done,
            Self::Canceled,
        ]
    }

    /// Status after a toggle: `Done` goes back to `To Do`, anything else
    /// becomes `Done`.
    pub fn toggled(self) -> Self {
        match self {
            Self::Done => Self::ToDo,
            _ => Self::Done,
        }
    }

    /// Status implied by the legacy `completed` flag
    pub fn from_completed(completed: bool) -> Self {
        if completed {
            Self::Done
        } else {
            Self::ToDo
        }
    }

    pub fn is_done(self) -> bool {
        self == Self::Done
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidVariant {
                field: "status",
                value: s.to_owned(),
            })
    }
}

/// Task priority. Ordered `Low < Medium < High`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl TaskPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    pub fn all() -> &'static [Self] {
        &[Self::Low, Self::Medium, Self::High]
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskPriority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|priority| priority.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidVariant {
                field: "priority",
                value: s.to_owned(),
            })
    }
}

/// A persisted task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Legacy completion flag, derived from `status`
    pub fn completed(&self) -> bool {
        self.status.is_done()
    }
}

/// Input for task creation, with defaults already applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: TaskTitle,
    pub status: TaskStatus,
    pub priority: TaskPriority,
}

impl NewTask {
    /// New task with default status (`To Do`) and priority (`Medium`)
    pub fn new(title: TaskTitle) -> Self {
        Self {
            title,
            status: TaskStatus::default(),
            priority: TaskPriority::default(),
        }
    }

    pub fn with_status(mut self, status: Option<TaskStatus>) -> Self {
        if let Some(status) = status {
            self.status = status;
        }
        self
    }

    pub fn with_priority(mut self, priority: Option<TaskPriority>) -> Self {
        if let Some(priority) = priority {
            self.priority = priority;
        }
        self
    }
}
