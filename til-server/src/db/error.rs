//! Storage error type shared by every backend

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(String),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    /// A foreign id in the payload does not resolve
    #[error("unknown {resource} '{id}'")]
    UnknownReference { resource: &'static str, id: String },

    /// The record cannot go while other rows point at it
    #[error("{resource} '{id}' is still referenced")]
    StillReferenced { resource: &'static str, id: String },
}

impl DbError {
    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    pub fn unknown_reference(resource: &'static str, id: impl ToString) -> Self {
        Self::UnknownReference {
            resource,
            id: id.to_string(),
        }
    }

    pub fn still_referenced(resource: &'static str, id: impl ToString) -> Self {
        Self::StillReferenced {
            resource,
            id: id.to_string(),
        }
    }
}
