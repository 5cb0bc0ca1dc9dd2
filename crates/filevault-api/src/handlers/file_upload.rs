use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::{StatusCode, Uri},
    Json,
};
use filevault_core::models::FileResponse;
use filevault_core::AppError;

use crate::error::HttpAppError;
use crate::state::AppState;
use crate::validation::{reject_query, require_file};

/// Upload file handler
///
/// Accepts a multipart body with a single file part named `file`, writes it
/// to the blob store and records its metadata.
///
/// # Errors
/// - `AppError::MalformedRequest` - query string present, or no usable file part
/// - `AppError::PayloadTooLarge` - body exceeds the configured upload limit
/// - `AppError::BlobWriteFailed` / `AppError::MetadataWriteFailed` - store failures
/// - `AppError::MetadataUnavailable` - metadata store unreachable
/// - `AppError::RecordNotCreated` - metadata store returned no row
#[tracing::instrument(skip(state, multipart), fields(operation = "upload_file"))]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<FileResponse>), HttpAppError> {
    reject_query(&uri)?;

    let multipart = multipart
        .map_err(|e| AppError::MalformedRequest(format!("Invalid multipart body: {}", e)))?;
    let file = require_file(multipart).await?;

    let record = state.files.create(file).await?;

    Ok((StatusCode::CREATED, Json(FileResponse::from(record))))
}
