//! Route modules

pub mod acronyms;
pub mod categories;
pub mod health;
pub mod users;
