use std::path::PathBuf;

use uuid::Uuid;

use crate::database::Database;
use crate::dto::profile::{CreateProfileRequest, UpdateProfileRequest};
use crate::error::Result;
use crate::models::Profile;
use crate::pictures::PictureStore;
use crate::repository::flat_file::FlatFileRepository;
use crate::repository::profile::ProfileRepository;

enum Backend {
    FlatFile(FlatFileRepository),
    Postgres(Database),
}

/// Profile store facade: one CRUD contract over the flat-file and relational
/// backends, picked once at startup. Owns the picture store so that deleting a
/// profile can clean up its blob.
pub struct ProfileStore {
    backend: Backend,
    pictures: PictureStore,
}

impl ProfileStore {
    pub fn flat_file(path: impl Into<PathBuf>, pictures: PictureStore) -> Self {
        Self {
            backend: Backend::FlatFile(FlatFileRepository::new(path)),
            pictures,
        }
    }

    pub fn postgres(db: Database, pictures: PictureStore) -> Self {
        Self {
            backend: Backend::Postgres(db),
            pictures,
        }
    }

    pub fn pictures(&self) -> &PictureStore {
        &self.pictures
    }

    pub async fn list(&self) -> Result<Vec<Profile>> {
        match &self.backend {
            Backend::FlatFile(repo) => repo.list().await,
            Backend::Postgres(db) => ProfileRepository::new(db.pool()).list().await,
        }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Profile> {
        match &self.backend {
            Backend::FlatFile(repo) => repo.find_by_id(id).await,
            Backend::Postgres(db) => ProfileRepository::new(db.pool()).find_by_id(id).await,
        }
    }

    pub async fn create(&self, req: &CreateProfileRequest) -> Result<Profile> {
        match &self.backend {
            Backend::FlatFile(repo) => repo.create(req).await,
            Backend::Postgres(db) => ProfileRepository::new(db.pool()).create(req).await,
        }
    }

    pub async fn update(&self, id: Uuid, req: &UpdateProfileRequest) -> Result<Profile> {
        match &self.backend {
            Backend::FlatFile(repo) => repo.update(id, req).await,
            Backend::Postgres(db) => ProfileRepository::new(db.pool()).update(id, req).await,
        }
    }

    /// Removes the record, then best-effort deletes its picture blob. A failed
    /// blob removal is logged and swallowed so the delete itself still succeeds.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let profile = self.find_by_id(id).await?;

        match &self.backend {
            Backend::FlatFile(repo) => repo.delete(id).await?,
            Backend::Postgres(db) => ProfileRepository::new(db.pool()).delete(id).await?,
        }

        if let Some(filename) = &profile.profile_picture {
            if let Err(e) = self.pictures.remove(filename).await {
                tracing::warn!("Failed to remove picture `{}` for deleted profile {}: {}", filename, id, e);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> ProfileStore {
        let base = std::env::temp_dir().join(format!("store-test-{}", Uuid::new_v4()));
        ProfileStore::flat_file(base.join("profiles.json"), PictureStore::new(base.join("pictures")))
    }

    #[tokio::test]
    async fn test_delete_also_removes_picture_blob() {
        let store = temp_store();

        let filename = store
            .pictures()
            .store(b"bytes", Some("me.png"), "image/png")
            .await
            .unwrap();
        let created = store
            .create(&CreateProfileRequest {
                full_name: "Ada Lovelace".to_string(),
                profile_picture: Some(filename.clone()),
                ..Default::default()
            })
            .await
            .unwrap();

        store.delete(created.profile_id).await.unwrap();

        assert!(store.find_by_id(created.profile_id).await.unwrap_err().is_not_found());
        assert!(store.pictures().open(&filename).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_survives_already_missing_picture() {
        let store = temp_store();

        let created = store
            .create(&CreateProfileRequest {
                full_name: "Ada Lovelace".to_string(),
                profile_picture: Some("dangling.png".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        // The referenced blob never existed; delete still succeeds.
        store.delete(created.profile_id).await.unwrap();
        assert!(store.list().await.unwrap().is_empty());
    }
}
