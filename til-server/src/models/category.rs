//! Category records

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::validation::{required_text, ValidationError};

/// Category record as stored and served
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
}

/// Validated values for creating or replacing a category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
}

impl NewCategory {
    pub fn new(name: Option<String>) -> Result<Self, ValidationError> {
        Ok(Self {
            name: required_text("name", name)?,
        })
    }

    pub fn into_record(self, id: Uuid) -> Category {
        Category { id, name: self.name }
    }
}
