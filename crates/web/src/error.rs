use axum::{
    Json,
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;
use storage::error::StorageError;
use validator::ValidationErrors;

/// Web layer error kinds. Everything except a storage `NotFound` maps to a 500
/// with a generic body, matching the contract the frontend was written against.
#[derive(Debug)]
pub enum ErrorKind {
    Storage(StorageError),
    Validation(ValidationErrors),
    Multipart(MultipartError),
    BadRequest(String),
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(e) => write!(f, "Storage error: {}", e),
            Self::Validation(e) => {
                let details: Vec<String> = e
                    .field_errors()
                    .iter()
                    .flat_map(|(field, errors)| {
                        errors.iter().map(move |e| {
                            format!(
                                "{}: {}",
                                field,
                                e.message
                                    .as_ref()
                                    .map(|m| m.to_string())
                                    .unwrap_or_else(|| e.code.to_string())
                            )
                        })
                    })
                    .collect();
                write!(f, "Validation error: {}", details.join("; "))
            }
            Self::Multipart(e) => write!(f, "Multipart error: {}", e),
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
        }
    }
}

impl From<StorageError> for ErrorKind {
    fn from(error: StorageError) -> Self {
        Self::Storage(error)
    }
}

impl From<ValidationErrors> for ErrorKind {
    fn from(error: ValidationErrors) -> Self {
        Self::Validation(error)
    }
}

impl From<MultipartError> for ErrorKind {
    fn from(error: MultipartError) -> Self {
        Self::Multipart(error)
    }
}

/// Whether response bodies carry the underlying error detail. Decided once at
/// startup from config and passed along in the app state; production keeps the
/// detail in the logs only.
#[derive(Debug, Clone, Copy)]
pub struct ErrorMode {
    expose_detail: bool,
}

impl ErrorMode {
    pub fn new(expose_detail: bool) -> Self {
        Self { expose_detail }
    }

    pub fn wrap(self, error: impl Into<ErrorKind>) -> WebError {
        WebError {
            kind: error.into(),
            expose_detail: self.expose_detail,
        }
    }
}

#[derive(Debug)]
pub struct WebError {
    kind: ErrorKind,
    expose_detail: bool,
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        if let ErrorKind::Storage(StorageError::NotFound) = &self.kind {
            let body = json!({ "message": "User not found" });
            return (StatusCode::NOT_FOUND, Json(body)).into_response();
        }

        tracing::error!("Request failed: {}", self.kind);

        let body = if self.expose_detail {
            json!({
                "message": "Something went wrong",
                "error": self.kind.to_string(),
            })
        } else {
            json!({ "message": "Something went wrong" })
        };

        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

pub type WebResult<T> = Result<T, WebError>;
