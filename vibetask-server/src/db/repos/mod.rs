//! Repository implementations for database access
//!
//! Each repository borrows the pool and issues exactly one statement per
//! operation.

pub mod tasks;

pub use tasks::{build_update, TaskRepo, TaskRow};
