//! Command implementations for the til CLI

pub mod db;
pub mod migrate;
pub mod revert;
pub mod serve;

// Re-export dispatcher functions for flat access from main.rs
pub use migrate::run_migrate;
pub use revert::run_revert;
pub use serve::run_serve;
