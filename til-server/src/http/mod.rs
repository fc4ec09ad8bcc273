//! HTTP server layer
//!
//! Axum server with:
//! - CORS (localhost only by default)
//! - Request tracing
//! - Graceful shutdown
//! - JSON error responses

pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;

#[cfg(test)]
pub(crate) mod test_utils;

pub use error::ApiError;
pub use server::{build_router, run_server, AppState, ServerConfig, ServerError};
