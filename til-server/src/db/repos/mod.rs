//! Repository implementations over the storage gateway
//!
//! Each repository borrows a `&dyn Storage` for the duration of a request and:
//! - turns absent rows into `DbError::NotFound`
//! - leaves foreign-key enforcement to storage
//! - logs writes at debug level

pub mod acronyms;
pub mod associations;
pub mod categories;
pub mod queries;
pub mod users;

pub use acronyms::AcronymRepo;
pub use associations::AssociationRepo;
pub use categories::CategoryRepo;
pub use queries::AcronymQuery;
pub use users::UserRepo;
