//! Database layer - connection pool, task stores and schema
//!
//! # Design Principles
//!
//! - Connection pool (max 5 connections) - no Arc<Mutex<Connection>>
//! - One statement per operation, no check-then-write
//! - Handlers only see `TaskStore`, so tests can swap in `MemoryTaskStore`

pub mod memory;
pub mod pool;
pub mod postgres;
pub mod repos;
pub mod schema;
pub mod store;

pub use memory::MemoryTaskStore;
pub use pool::{create_pool, create_pool_with_options};
pub use postgres::PgTaskStore;
pub use store::{DbError, TaskStore};
