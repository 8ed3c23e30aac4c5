use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::Value;
use storage::pictures::MAX_PICTURE_BYTES;
use storage::{PictureStore, ProfileStore};
use tower::ServiceExt;
use uuid::Uuid;
use web::error::ErrorMode;
use web::state::AppState;

const BOUNDARY: &str = "test-boundary";

fn test_app() -> Router {
    let base = std::env::temp_dir().join(format!("web-test-{}", Uuid::new_v4()));
    let store = ProfileStore::flat_file(
        base.join("profiles.json"),
        PictureStore::new(base.join("pictures")),
    );
    web::app(AppState {
        store: Arc::new(store),
        errors: ErrorMode::new(true),
    })
}

fn text_part(name: &str, value: &str) -> Vec<u8> {
    format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
        .into_bytes()
}

fn file_part(name: &str, filename: &str, content_type: &str, bytes: &[u8]) -> Vec<u8> {
    let mut part = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
    )
    .into_bytes();
    part.extend_from_slice(bytes);
    part.extend_from_slice(b"\r\n");
    part
}

fn multipart_request(method: &str, uri: &str, parts: Vec<Vec<u8>>) -> Request<Body> {
    let mut body: Vec<u8> = parts.concat();
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method(method)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn create_profile(app: &Router, parts: Vec<Vec<u8>>) -> Value {
    let response = app
        .clone()
        .oneshot(multipart_request("POST", "/api/users", parts))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response).await
}

#[tokio::test]
async fn test_list_is_empty_on_first_run() {
    let app = test_app();

    let response = app.oneshot(get("/api/users")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, serde_json::json!([]));
}

#[tokio::test]
async fn test_create_and_fetch_profile() {
    let app = test_app();

    let created = create_profile(
        &app,
        vec![
            text_part("fullName", "Ada Lovelace"),
            text_part("profession", "Mathematician"),
            text_part("skills", r#"["analysis","poetry"]"#),
            text_part(
                "projects",
                r#"[{"name":"Notes","link":"https://example.com/notes"}]"#,
            ),
            text_part(
                "socials",
                r#"[{"platform":"letters","link":"https://example.com/ada"}]"#,
            ),
        ],
    )
    .await;

    assert_eq!(created["fullName"], "Ada Lovelace");
    assert_eq!(created["profession"], "Mathematician");
    assert_eq!(created["skills"], serde_json::json!(["analysis", "poetry"]));
    assert_eq!(created["projects"][0]["name"], "Notes");
    assert_eq!(created["socials"][0]["platform"], "letters");

    let id = created["profileId"].as_str().unwrap().to_string();
    let response = app
        .clone()
        .oneshot(get(&format!("/api/users/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, created);

    let response = app.oneshot(get("/api/users")).await.unwrap();
    let listed = json_body(response).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_get_unknown_id_is_404() {
    let app = test_app();

    let response = app
        .oneshot(get(&format!("/api/users/{}", Uuid::new_v4())))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await["message"], "User not found");
}

#[tokio::test]
async fn test_malformed_skills_json_rejects_request() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(multipart_request(
            "POST",
            "/api/users",
            vec![
                text_part("fullName", "Ada Lovelace"),
                text_part("skills", "analysis,poetry"),
            ],
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_body(response).await["message"], "Something went wrong");

    // The rejected request must not have been persisted.
    let response = app.oneshot(get("/api/users")).await.unwrap();
    assert_eq!(json_body(response).await, serde_json::json!([]));
}

#[tokio::test]
async fn test_missing_full_name_rejects_request() {
    let app = test_app();

    let response = app
        .oneshot(multipart_request(
            "POST",
            "/api/users",
            vec![text_part("profession", "Mathematician")],
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_update_merges_by_presence() {
    let app = test_app();

    let created = create_profile(
        &app,
        vec![
            text_part("fullName", "Ada Lovelace"),
            text_part("profession", "Mathematician"),
            text_part("skills", r#"["analysis"]"#),
        ],
    )
    .await;
    let id = created["profileId"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(multipart_request(
            "PUT",
            &format!("/api/users/{id}"),
            vec![text_part("skills", r#"["analytical engines"]"#)],
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let updated = json_body(response).await;
    assert_eq!(updated["skills"], serde_json::json!(["analytical engines"]));
    assert_eq!(updated["profession"], "Mathematician");
    assert_eq!(updated["fullName"], "Ada Lovelace");
}

#[tokio::test]
async fn test_update_unknown_id_is_404() {
    let app = test_app();

    let response = app
        .oneshot(multipart_request(
            "PUT",
            &format!("/api/users/{}", Uuid::new_v4()),
            vec![text_part("profession", "Countess")],
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_picture_upload_and_fetch() {
    let app = test_app();

    let created = create_profile(
        &app,
        vec![
            text_part("fullName", "Ada Lovelace"),
            file_part("profilePicture", "portrait.png", "image/png", b"png bytes"),
        ],
    )
    .await;
    let id = created["profileId"].as_str().unwrap().to_string();
    assert!(
        created["profilePicture"]
            .as_str()
            .unwrap()
            .ends_with(".png")
    );

    let response = app
        .oneshot(get(&format!("/api/users/{id}/profile-picture")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "image/png"
    );
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"png bytes");
}

#[tokio::test]
async fn test_multi_mebibyte_image_upload_is_accepted() {
    let app = test_app();

    // Well above axum's 2 MB default body limit, well below the picture cap.
    let image = vec![0x89u8; 3 * 1024 * 1024];
    let created = create_profile(
        &app,
        vec![
            text_part("fullName", "Ada Lovelace"),
            file_part("profilePicture", "portrait.png", "image/png", &image),
        ],
    )
    .await;
    let id = created["profileId"].as_str().unwrap().to_string();

    let response = app
        .oneshot(get(&format!("/api/users/{id}/profile-picture")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(bytes.len(), image.len());
}

#[tokio::test]
async fn test_oversized_image_upload_rejected() {
    let app = test_app();

    let oversized = vec![0u8; MAX_PICTURE_BYTES + 1];
    let response = app
        .clone()
        .oneshot(multipart_request(
            "POST",
            "/api/users",
            vec![
                text_part("fullName", "Ada Lovelace"),
                file_part("profilePicture", "huge.png", "image/png", &oversized),
            ],
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    // The rejected upload persisted nothing.
    let response = app.oneshot(get("/api/users")).await.unwrap();
    assert_eq!(json_body(response).await, serde_json::json!([]));
}

#[tokio::test]
async fn test_non_image_upload_rejected() {
    let app = test_app();

    let response = app
        .oneshot(multipart_request(
            "POST",
            "/api/users",
            vec![
                text_part("fullName", "Ada Lovelace"),
                file_part("profilePicture", "page.html", "text/html", b"<html>"),
            ],
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_picture_missing_is_404() {
    let app = test_app();

    let created = create_profile(&app, vec![text_part("fullName", "Ada Lovelace")]).await;
    let id = created["profileId"].as_str().unwrap().to_string();

    // Record exists but carries no picture.
    let response = app
        .oneshot(get(&format!("/api/users/{id}/profile-picture")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_removes_record_and_picture() {
    let app = test_app();

    let created = create_profile(
        &app,
        vec![
            text_part("fullName", "Ada Lovelace"),
            file_part("profilePicture", "portrait.png", "image/png", b"png bytes"),
        ],
    )
    .await;
    let id = created["profileId"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/users/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await["message"],
        "User deleted successfully"
    );

    let response = app
        .clone()
        .oneshot(get(&format!("/api/users/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(get(&format!("/api/users/{id}/profile-picture")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_unknown_id_is_404() {
    let app = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/users/{}", Uuid::new_v4()))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
