use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use storage::dto::profile::{CreateProfileRequest, ProfileResponse, UpdateProfileRequest};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::state::AppState;

use super::form::ProfileForm;
use super::services;

#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "List all profiles", body = Vec<ProfileResponse>)
    ),
    tag = "users"
)]
pub async fn list_users(State(state): State<AppState>) -> Result<Response, WebError> {
    let profiles = services::list_profiles(&state.store)
        .await
        .map_err(|e| state.errors.wrap(e))?;

    let response: Vec<ProfileResponse> = profiles.into_iter().map(ProfileResponse::from).collect();

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(
        ("id" = Uuid, Path, description = "Profile id")
    ),
    responses(
        (status = 200, description = "Profile found", body = ProfileResponse),
        (status = 404, description = "Profile not found")
    ),
    tag = "users"
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let profile = services::get_profile(&state.store, id)
        .await
        .map_err(|e| state.errors.wrap(e))?;

    Ok(Json(ProfileResponse::from(profile)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/users",
    request_body(content = CreateProfileRequest, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Profile created", body = ProfileResponse),
        (status = 500, description = "Validation or storage error")
    ),
    tag = "users"
)]
pub async fn create_user(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, WebError> {
    let mut form = ProfileForm::from_multipart(multipart)
        .await
        .map_err(|e| state.errors.wrap(e))?;

    // Field validation runs before anything touches disk.
    let picture = form.picture.take();
    let mut req = form.into_create_request(None);
    req.validate().map_err(|e| state.errors.wrap(e))?;

    if let Some(picture) = picture {
        let filename = state
            .store
            .pictures()
            .store(&picture.bytes, picture.file_name.as_deref(), &picture.content_type)
            .await
            .map_err(|e| state.errors.wrap(e))?;
        req.profile_picture = Some(filename);
    }

    let profile = services::create_profile(&state.store, &req)
        .await
        .map_err(|e| state.errors.wrap(e))?;

    Ok((StatusCode::CREATED, Json(ProfileResponse::from(profile))).into_response())
}

#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(
        ("id" = Uuid, Path, description = "Profile id")
    ),
    request_body(content = UpdateProfileRequest, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Profile updated", body = ProfileResponse),
        (status = 404, description = "Profile not found"),
        (status = 500, description = "Validation or storage error")
    ),
    tag = "users"
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Response, WebError> {
    let mut form = ProfileForm::from_multipart(multipart)
        .await
        .map_err(|e| state.errors.wrap(e))?;

    let picture = form.picture.take();
    let mut req = form.into_update_request(None);
    req.validate().map_err(|e| state.errors.wrap(e))?;

    if let Some(picture) = picture {
        let filename = state
            .store
            .pictures()
            .store(&picture.bytes, picture.file_name.as_deref(), &picture.content_type)
            .await
            .map_err(|e| state.errors.wrap(e))?;
        req.profile_picture = Some(filename);
    }

    let profile = services::update_profile(&state.store, id, &req)
        .await
        .map_err(|e| state.errors.wrap(e))?;

    Ok(Json(ProfileResponse::from(profile)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(
        ("id" = Uuid, Path, description = "Profile id")
    ),
    responses(
        (status = 200, description = "Profile deleted"),
        (status = 404, description = "Profile not found")
    ),
    tag = "users"
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::delete_profile(&state.store, id)
        .await
        .map_err(|e| state.errors.wrap(e))?;

    Ok(Json(json!({ "message": "User deleted successfully" })).into_response())
}

#[utoipa::path(
    get,
    path = "/api/users/{id}/profile-picture",
    params(
        ("id" = Uuid, Path, description = "Profile id")
    ),
    responses(
        (status = 200, description = "Picture bytes, content type by extension"),
        (status = 404, description = "Profile or picture not found")
    ),
    tag = "users"
)]
pub async fn get_profile_picture(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let (content_type, bytes) = services::get_profile_picture(&state.store, id)
        .await
        .map_err(|e| state.errors.wrap(e))?;

    Ok(([(header::CONTENT_TYPE, content_type)], bytes).into_response())
}
