//! User records

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::validation::{required_text, ValidationError};

/// User record as stored and served
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub username: String,
}

/// Validated values for creating or replacing a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub username: String,
}

impl NewUser {
    /// Validate raw request fields into a complete user.
    ///
    /// Both fields are required; updates are full replacements.
    ///
    /// # Example
    /// ```
    /// use til_server::models::NewUser;
    ///
    /// assert!(NewUser::new(Some("Alice".into()), Some("alicea".into())).is_ok());
    /// assert!(NewUser::new(Some("Alice".into()), None).is_err());
    /// ```
    pub fn new(name: Option<String>, username: Option<String>) -> Result<Self, ValidationError> {
        Ok(Self {
            name: required_text("name", name)?,
            username: required_text("username", username)?,
        })
    }

    /// Attach an id, producing the stored record.
    pub fn into_record(self, id: Uuid) -> User {
        User {
            id,
            name: self.name,
            username: self.username,
        }
    }
}
