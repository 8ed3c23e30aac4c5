use axum::{
    Router,
    routing::{delete, get, post, put},
};

use super::handlers::{
    create_user, delete_user, get_profile_picture, get_user, list_users, update_user,
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/", post(create_user))
        .route("/:id", get(get_user))
        .route("/:id", put(update_user))
        .route("/:id", delete(delete_user))
        .route("/:id/profile-picture", get(get_profile_picture))
}
