use storage::{
    ProfileStore,
    dto::profile::{CreateProfileRequest, UpdateProfileRequest},
    error::{Result, StorageError},
    models::Profile,
    pictures,
};
use uuid::Uuid;

/// List all profiles
pub async fn list_profiles(store: &ProfileStore) -> Result<Vec<Profile>> {
    store.list().await
}

/// Get profile by id
pub async fn get_profile(store: &ProfileStore, id: Uuid) -> Result<Profile> {
    store.find_by_id(id).await
}

/// Create a new profile
pub async fn create_profile(store: &ProfileStore, req: &CreateProfileRequest) -> Result<Profile> {
    store.create(req).await
}

/// Update an existing profile
pub async fn update_profile(
    store: &ProfileStore,
    id: Uuid,
    req: &UpdateProfileRequest,
) -> Result<Profile> {
    store.update(id, req).await
}

/// Delete a profile (and, best-effort, its picture blob)
pub async fn delete_profile(store: &ProfileStore, id: Uuid) -> Result<()> {
    store.delete(id).await
}

/// Fetch a profile's picture bytes with the content type derived from the
/// stored filename. A profile without a picture, or a picture whose blob has
/// gone missing, is not found.
pub async fn get_profile_picture(
    store: &ProfileStore,
    id: Uuid,
) -> Result<(&'static str, Vec<u8>)> {
    let profile = store.find_by_id(id).await?;
    let filename = profile.profile_picture.ok_or(StorageError::NotFound)?;

    let bytes = store
        .pictures()
        .open(&filename)
        .await?
        .ok_or(StorageError::NotFound)?;

    Ok((pictures::content_type_for(&filename), bytes))
}
