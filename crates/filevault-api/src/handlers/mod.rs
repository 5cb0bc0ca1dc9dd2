pub mod file_delete;
pub mod file_get;
pub mod file_upload;
pub mod health;

use axum::http::{header, HeaderName, StatusCode};
use axum::response::IntoResponse;
use filevault_core::AppError;

use crate::error::HttpAppError;

/// Headers attached to health responses and to every 405.
pub const NO_CACHE_HEADERS: [(HeaderName, &str); 3] = [
    (header::CACHE_CONTROL, "no-cache, no-store, must-revalidate"),
    (header::PRAGMA, "no-cache"),
    (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
];

/// Reply 405 to any method a route does not serve.
pub async fn method_not_allowed() -> impl IntoResponse {
    (StatusCode::METHOD_NOT_ALLOWED, NO_CACHE_HEADERS)
}

/// `GET` or `DELETE /v1/file/` with the id segment left empty.
pub async fn missing_file_id() -> HttpAppError {
    HttpAppError(AppError::MalformedRequest("Missing file id".to_string()))
}
