//! til-server: REST backend for acronyms, categories and users
//!
//! Users own acronyms; acronyms and categories are linked many-to-many
//! through a pivot table. Storage sits behind the [`db::Storage`] trait
//! with a PostgreSQL backend for production and an in-memory one for
//! tests and `--memory` runs.

pub mod db;
pub mod http;
pub mod models;

pub use db::{DatabaseConfig, DbError, MemoryStorage, PgStorage, Storage};
pub use http::{run_server, ServerConfig};
