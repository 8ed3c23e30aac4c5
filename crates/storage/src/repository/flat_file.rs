use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::dto::profile::{CreateProfileRequest, UpdateProfileRequest};
use crate::error::{Result, StorageError};
use crate::models::Profile;

/// Flat-file profile repository: the backing store is a single JSON array of
/// profiles, and the whole document is the unit of durability. Every mutation
/// loads the full array, applies the change in memory, and rewrites the file.
///
/// There is deliberately no lock around the read-modify-write cycle: two
/// overlapping writers race, and the later full-document write silently
/// discards whatever the earlier writer changed. That lost-update window is an
/// accepted limitation of this store, demonstrated in the tests below.
#[derive(Debug, Clone)]
pub struct FlatFileRepository {
    path: PathBuf,
}

impl FlatFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Full in-order contents of the document. A missing file is the first-run
    /// case and yields an empty list.
    pub async fn list(&self) -> Result<Vec<Profile>> {
        self.load_document().await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Profile> {
        let profiles = self.load_document().await?;
        profiles
            .into_iter()
            .find(|p| p.profile_id == id)
            .ok_or(StorageError::NotFound)
    }

    pub async fn create(&self, req: &CreateProfileRequest) -> Result<Profile> {
        let mut profiles = self.load_document().await?;
        let profile = Profile::from_request(req);
        profiles.push(profile.clone());
        self.persist_document(&profiles).await?;
        Ok(profile)
    }

    pub async fn update(&self, id: Uuid, req: &UpdateProfileRequest) -> Result<Profile> {
        let mut profiles = self.load_document().await?;
        let profile = profiles
            .iter_mut()
            .find(|p| p.profile_id == id)
            .ok_or(StorageError::NotFound)?;

        req.apply_to(profile);
        let updated = profile.clone();
        self.persist_document(&profiles).await?;
        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let mut profiles = self.load_document().await?;
        let index = profiles
            .iter()
            .position(|p| p.profile_id == id)
            .ok_or(StorageError::NotFound)?;

        profiles.remove(index);
        self.persist_document(&profiles).await
    }

    async fn load_document(&self) -> Result<Vec<Profile>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn persist_document(&self, profiles: &[Profile]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let bytes = serde_json::to_vec_pretty(profiles)?;
        tokio::fs::write(&self.path, bytes).await?;
        Ok(())
    }
}
