//! Error types module
//!
//! `AppError` enumerates every fault category a file or health workflow can
//! surface. Adapters classify their own failures and the services translate
//! them into one of these variants.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues and accepted inconsistencies
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "METADATA_UNAVAILABLE")
    fn error_code(&self) -> &'static str;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Metadata store unavailable: {0}")]
    MetadataUnavailable(String),

    #[error("Metadata read failed: {0}")]
    MetadataReadFailed(String),

    #[error("Metadata write failed: {0}")]
    MetadataWriteFailed(String),

    #[error("Metadata delete failed: {0}")]
    MetadataDeleteFailed(String),

    #[error("Metadata store returned no record for file {0}")]
    RecordNotCreated(String),

    #[error("Blob write failed: {0}")]
    BlobWriteFailed(String),

    #[error("Blob delete failed: {0}")]
    BlobDeleteFailed(String),

    #[error("Blob probe failed: {0}")]
    BlobProbeFailed(String),

    #[error("Health check record failed: {0}")]
    HealthRecordFailed(String),
}

/// Static metadata for each variant: (http_status, error_code, log_level).
fn app_error_static_metadata(err: &AppError) -> (u16, &'static str, LogLevel) {
    match err {
        AppError::MalformedRequest(_) => (400, "MALFORMED_REQUEST", LogLevel::Debug),
        AppError::PayloadTooLarge(_) => (413, "PAYLOAD_TOO_LARGE", LogLevel::Debug),
        AppError::NotFound(_) => (404, "NOT_FOUND", LogLevel::Debug),
        AppError::MetadataUnavailable(_) => (503, "METADATA_UNAVAILABLE", LogLevel::Warn),
        AppError::MetadataReadFailed(_) => (400, "METADATA_READ_FAILED", LogLevel::Error),
        AppError::MetadataWriteFailed(_) => (400, "METADATA_WRITE_FAILED", LogLevel::Error),
        AppError::MetadataDeleteFailed(_) => (400, "METADATA_DELETE_FAILED", LogLevel::Error),
        AppError::RecordNotCreated(_) => (422, "RECORD_NOT_CREATED", LogLevel::Error),
        AppError::BlobWriteFailed(_) => (400, "BLOB_WRITE_FAILED", LogLevel::Error),
        AppError::BlobDeleteFailed(_) => (400, "BLOB_DELETE_FAILED", LogLevel::Error),
        AppError::BlobProbeFailed(_) => (400, "BLOB_PROBE_FAILED", LogLevel::Error),
        AppError::HealthRecordFailed(_) => (503, "HEALTH_RECORD_FAILED", LogLevel::Error),
    }
}

impl AppError {
    /// Get the error type name for log fields
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::MalformedRequest(_) => "MalformedRequest",
            AppError::PayloadTooLarge(_) => "PayloadTooLarge",
            AppError::NotFound(_) => "NotFound",
            AppError::MetadataUnavailable(_) => "MetadataUnavailable",
            AppError::MetadataReadFailed(_) => "MetadataReadFailed",
            AppError::MetadataWriteFailed(_) => "MetadataWriteFailed",
            AppError::MetadataDeleteFailed(_) => "MetadataDeleteFailed",
            AppError::RecordNotCreated(_) => "RecordNotCreated",
            AppError::BlobWriteFailed(_) => "BlobWriteFailed",
            AppError::BlobDeleteFailed(_) => "BlobDeleteFailed",
            AppError::BlobProbeFailed(_) => "BlobProbeFailed",
            AppError::HealthRecordFailed(_) => "HealthRecordFailed",
        }
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).2
    }
}
