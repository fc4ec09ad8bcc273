//! Database layer - storage gateway, backends and repositories
//!
//! # Design Principles
//!
//! - Storage is injected as `&dyn Storage` - no global pool
//! - Rely on DB constraints for integrity; existence checks only pick the 404
//! - Absent rows become `DbError::NotFound` in the repositories

pub mod config;
pub mod error;
pub mod memory;
pub mod migrations;
pub mod pool;
pub mod postgres;
pub mod repos;
pub mod storage;

pub use config::DatabaseConfig;
pub use error::DbError;
pub use memory::MemoryStorage;
pub use pool::create_pool;
pub use postgres::PgStorage;
pub use repos::*;
pub use storage::Storage;
