use axum::Router;
use axum::extract::DefaultBodyLimit;
use storage::pictures::MAX_PICTURE_BYTES;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod error;
pub mod features;
pub mod state;

use state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::users::handlers::list_users,
        features::users::handlers::get_user,
        features::users::handlers::create_user,
        features::users::handlers::update_user,
        features::users::handlers::delete_user,
        features::users::handlers::get_profile_picture,
    ),
    components(
        schemas(
            storage::dto::profile::CreateProfileRequest,
            storage::dto::profile::UpdateProfileRequest,
            storage::dto::profile::ProfileResponse,
            storage::models::Profile,
            storage::models::Project,
            storage::models::Social,
        )
    ),
    tags(
        (name = "users", description = "Profile CRUD endpoints"),
    )
)]
pub struct ApiDoc;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api/users", features::users::routes::routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Axum's default body limit (2 MB) is tighter than the picture cap;
        // raise it past the cap plus multipart framing so the picture store's
        // own size check is the operative limit.
        .layer(DefaultBodyLimit::max(MAX_PICTURE_BYTES + 1024 * 1024))
        .layer(cors)
        .with_state(state)
}
