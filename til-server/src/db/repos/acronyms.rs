//! Acronym repository

use uuid::Uuid;

use crate::db::{DbError, Storage};
use crate::models::{Acronym, NewAcronym, User};

const RESOURCE: &str = "acronym";

/// Acronym repository
pub struct AcronymRepo<'a> {
    storage: &'a dyn Storage,
}

impl<'a> AcronymRepo<'a> {
    pub fn new(storage: &'a dyn Storage) -> Self {
        Self { storage }
    }

    /// Insert a new acronym. Fails with `UnknownReference` if the owner doesn't exist.
    pub async fn create(&self, acronym: NewAcronym) -> Result<Acronym, DbError> {
        let acronym = self.storage.insert_acronym(acronym).await?;
        tracing::debug!(id = %acronym.id, user_id = %acronym.user_id, "acronym created");
        Ok(acronym)
    }

    pub async fn list(&self) -> Result<Vec<Acronym>, DbError> {
        self.storage.all_acronyms().await
    }

    pub async fn get(&self, id: Uuid) -> Result<Acronym, DbError> {
        self.storage
            .find_acronym(id)
            .await?
            .ok_or_else(|| DbError::not_found(RESOURCE, id))
    }

    /// Replace short, long and owner in one go.
    pub async fn update(&self, id: Uuid, acronym: NewAcronym) -> Result<Acronym, DbError> {
        let acronym = self
            .storage
            .replace_acronym(id, acronym)
            .await?
            .ok_or_else(|| DbError::not_found(RESOURCE, id))?;
        tracing::debug!(%id, "acronym replaced");
        Ok(acronym)
    }

    /// Delete an acronym; its pivot rows go with it.
    pub async fn delete(&self, id: Uuid) -> Result<(), DbError> {
        if !self.storage.remove_acronym(id).await? {
            return Err(DbError::not_found(RESOURCE, id));
        }
        tracing::debug!(%id, "acronym deleted");
        Ok(())
    }

    /// The user owning an acronym.
    pub async fn user(&self, id: Uuid) -> Result<User, DbError> {
        let acronym = self.get(id).await?;
        self.storage
            .find_user(acronym.user_id)
            .await?
            .ok_or_else(|| DbError::not_found("user", acronym.user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repos::fixtures;
    use crate::db::MemoryStorage;

    #[tokio::test]
    async fn create_requires_existing_owner() {
        let storage = MemoryStorage::new();
        let repo = AcronymRepo::new(&storage);
        let ghost = Uuid::new_v4();

        let err = repo
            .create(NewAcronym {
                short: "OMG".into(),
                long: "Oh My God".into(),
                user_id: ghost,
            })
            .await
            .unwrap_err();

        match err {
            DbError::UnknownReference { resource, id } => {
                assert_eq!(resource, "user");
                assert_eq!(id, ghost.to_string());
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_replaces_short_long_and_owner() {
        let storage = MemoryStorage::new();
        let alice = fixtures::user(&storage, "Alice", "alicea").await;
        let bob = fixtures::user(&storage, "Bob", "bobb").await;
        let omg = fixtures::acronym(&storage, "OMG", "Oh My God", alice.id).await;
        let repo = AcronymRepo::new(&storage);

        let brb = repo
            .update(
                omg.id,
                NewAcronym {
                    short: "BRB".into(),
                    long: "Be Right Back".into(),
                    user_id: bob.id,
                },
            )
            .await
            .unwrap();

        assert_eq!(brb.id, omg.id);
        assert_eq!(brb.short, "BRB");
        assert_eq!(brb.long, "Be Right Back");
        assert_eq!(repo.user(omg.id).await.unwrap(), bob);
    }

    #[tokio::test]
    async fn update_to_unknown_owner_is_rejected() {
        let storage = MemoryStorage::new();
        let alice = fixtures::user(&storage, "Alice", "alicea").await;
        let omg = fixtures::acronym(&storage, "OMG", "Oh My God", alice.id).await;
        let repo = AcronymRepo::new(&storage);

        let err = repo
            .update(
                omg.id,
                NewAcronym {
                    short: "OMG".into(),
                    long: "Oh My God".into(),
                    user_id: Uuid::new_v4(),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::UnknownReference { .. }));
        assert_eq!(repo.get(omg.id).await.unwrap().user_id, alice.id);
    }

    #[tokio::test]
    async fn delete_missing_is_not_found() {
        let storage = MemoryStorage::new();
        let repo = AcronymRepo::new(&storage);
        assert!(matches!(
            repo.delete(Uuid::new_v4()).await,
            Err(DbError::NotFound { resource: "acronym", .. })
        ));
    }

    #[tokio::test]
    async fn user_of_missing_acronym_is_not_found() {
        let storage = MemoryStorage::new();
        let repo = AcronymRepo::new(&storage);
        assert!(matches!(
            repo.user(Uuid::new_v4()).await,
            Err(DbError::NotFound { resource: "acronym", .. })
        ));
    }
}
