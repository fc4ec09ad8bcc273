//! Acronym queries - search, first, sorted

use crate::db::{DbError, Storage};
use crate::models::{Acronym, SearchTerm};

/// Read-only acronym queries
pub struct AcronymQuery<'a> {
    storage: &'a dyn Storage,
}

impl<'a> AcronymQuery<'a> {
    pub fn new(storage: &'a dyn Storage) -> Self {
        Self { storage }
    }

    /// Acronyms whose short or long form equals `term` exactly.
    pub async fn search(&self, term: &SearchTerm) -> Result<Vec<Acronym>, DbError> {
        self.storage.acronyms_matching(term).await
    }

    /// The first acronym in storage order.
    pub async fn first(&self) -> Result<Acronym, DbError> {
        self.storage
            .first_acronym()
            .await?
            .ok_or_else(|| DbError::not_found("acronym", "first"))
    }

    /// All acronyms, ascending by short form.
    pub async fn sorted_by_short(&self) -> Result<Vec<Acronym>, DbError> {
        self.storage.acronyms_by_short().await
    }
}
