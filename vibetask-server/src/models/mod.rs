//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod patch;
pub mod task;
pub mod validation;

pub use patch::{TaskChanges, TaskPatch};
pub use task::{NewTask, Task, TaskId, TaskPriority, TaskStatus, TaskTitle, MAX_TITLE_LEN};
pub use validation::ValidationError;
