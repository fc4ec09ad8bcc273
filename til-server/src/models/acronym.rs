//! Acronym records
//!
//! The owner travels as `userID` on the wire; `ownerID` is accepted on input.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::validation::{required_text, ValidationError};

/// Acronym record as stored and served
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Acronym {
    pub id: Uuid,
    pub short: String,
    pub long: String,
    #[serde(rename = "userID", alias = "ownerID")]
    pub user_id: Uuid,
}

/// Validated values for creating or replacing an acronym
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAcronym {
    pub short: String,
    pub long: String,
    pub user_id: Uuid,
}

impl NewAcronym {
    /// Validate raw request fields into a complete acronym.
    ///
    /// Whether `user_id` resolves is left to storage.
    pub fn new(
        short: Option<String>,
        long: Option<String>,
        user_id: Option<Uuid>,
    ) -> Result<Self, ValidationError> {
        let short = required_text("short", short)?;
        let long = required_text("long", long)?;
        let user_id = user_id.ok_or(ValidationError::Missing { field: "userID" })?;

        Ok(Self {
            short,
            long,
            user_id,
        })
    }

    /// Attach an id, producing the stored record.
    pub fn into_record(self, id: Uuid) -> Acronym {
        Acronym {
            id,
            short: self.short,
            long: self.long,
            user_id: self.user_id,
        }
    }
}
