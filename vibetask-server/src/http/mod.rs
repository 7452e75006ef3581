//! HTTP server layer
//!
//! Axum server with:
//! - `/api` task routes and health check
//! - Static front-end hosting for everything else
//! - CORS (permissive in development, localhost only in production)
//! - Request tracing
//! - Graceful shutdown
//! - JSON envelope responses, including errors

pub mod envelope;
pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;

pub use envelope::ApiResponse;
pub use error::ApiError;
pub use server::{build_router, run_server, ServerConfig, ServerError};
