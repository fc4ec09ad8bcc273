//! Domain models with validation at construction
//!
//! Request payloads are turned into these types before touching storage.
//! Invalid input returns ValidationError, not panic.

pub mod acronym;
pub mod category;
pub mod search;
pub mod user;
pub mod validation;

pub use acronym::{Acronym, NewAcronym};
pub use category::{Category, NewCategory};
pub use search::SearchTerm;
pub use user::{NewUser, User};
pub use validation::ValidationError;
