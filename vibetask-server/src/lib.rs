//! vibetask-server: task-tracking HTTP API over PostgreSQL
//!
//! - `models`: task types, defaults, partial updates, validation
//! - `db`: connection pool, `TaskStore` implementations, schema migration
//! - `http`: axum router, envelope responses, static front end
//! - `config`: environment-driven settings

pub mod config;
pub mod db;
pub mod http;
pub mod models;
pub mod state;

pub use config::{AppConfig, ConfigError, DatabaseConfig, RunMode};
pub use db::{DbError, MemoryTaskStore, PgTaskStore, TaskStore};
pub use http::{run_server, ServerConfig, ServerError};
pub use state::AppState;
