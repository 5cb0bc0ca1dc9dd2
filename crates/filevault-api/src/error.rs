//! HTTP error response conversion
//!
//! Handlers return `Result<impl IntoResponse, HttpAppError>`. The status comes
//! from `ErrorMetadata`; error responses carry no body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use filevault_core::{AppError, ErrorMetadata, LogLevel};

/// Wrapper type for AppError to implement IntoResponse
/// This is necessary because of Rust's orphan rules - we can't implement
/// IntoResponse (external trait) for AppError (external type from filevault-core)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    let code = error.error_code();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type, code, "Request rejected");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type, code, "Request failed");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type, code, "Request failed");
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(&self.0);

        status.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::MalformedRequest("q".to_string()), 400),
            (AppError::PayloadTooLarge("big".to_string()), 413),
            (AppError::NotFound("id".to_string()), 404),
            (AppError::MetadataUnavailable("down".to_string()), 503),
            (AppError::MetadataWriteFailed("x".to_string()), 400),
            (AppError::RecordNotCreated("id".to_string()), 422),
            (AppError::BlobWriteFailed("x".to_string()), 400),
            (AppError::HealthRecordFailed("x".to_string()), 503),
        ];

        for (err, expected) in cases {
            let response = HttpAppError::from(err).into_response();
            assert_eq!(response.status().as_u16(), expected);
        }
    }

    #[tokio::test]
    async fn test_error_body_is_empty() {
        let response = HttpAppError(AppError::NotFound("missing".to_string())).into_response();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(body.is_empty());
    }
}
