//! Request validation for the file and health endpoints
//!
//! Every check runs before an orchestrator is called and rejects with
//! `AppError::MalformedRequest`, except an oversized multipart body which is
//! `AppError::PayloadTooLarge`.

use std::collections::HashMap;

use axum::extract::multipart::{Multipart, MultipartError};
use axum::http::{header, HeaderMap, StatusCode, Uri};
use filevault_core::models::NewFile;
use filevault_core::AppError;
use uuid::Uuid;

/// Multipart field that carries the upload.
pub const FILE_FIELD: &str = "file";

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Reject any non-empty query string.
pub fn reject_query(uri: &Uri) -> Result<(), AppError> {
    match uri.query() {
        Some(q) if !q.is_empty() => Err(AppError::MalformedRequest(format!(
            "Unexpected query string: {}",
            q
        ))),
        _ => Ok(()),
    }
}

/// Require exactly one path parameter, `id`, holding a UUID.
pub fn require_file_id(params: &HashMap<String, String>) -> Result<Uuid, AppError> {
    if params.len() != 1 {
        return Err(AppError::MalformedRequest(format!(
            "Expected exactly one path parameter, got {}",
            params.len()
        )));
    }

    let id = params
        .get("id")
        .ok_or_else(|| AppError::MalformedRequest("Missing file id".to_string()))?;

    Uuid::parse_str(id)
        .map_err(|_| AppError::MalformedRequest(format!("Invalid file id: {}", id)))
}

/// Reject a declared body on an endpoint that takes none.
pub fn reject_body(headers: &HeaderMap) -> Result<(), AppError> {
    let Some(value) = headers.get(header::CONTENT_LENGTH) else {
        return Ok(());
    };

    let length = value
        .to_str()
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .ok_or_else(|| AppError::MalformedRequest("Invalid Content-Length header".to_string()))?;

    if length > 0 {
        return Err(AppError::MalformedRequest(format!(
            "Unexpected request body of {} bytes",
            length
        )));
    }

    Ok(())
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::MalformedRequest(format!("Failed to read multipart: {}", err.body_text()))
    }
}

/// Reduce a client-supplied filename to its last path component.
pub fn base_file_name(raw: &str) -> Result<String, AppError> {
    let name = raw.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(raw);

    match name.trim() {
        "" | "." | ".." => Err(AppError::MalformedRequest(format!(
            "Invalid file name: {}",
            raw
        ))),
        _ => Ok(name.to_string()),
    }
}

/// Read the single file part named `file` out of a multipart body.
///
/// Parts without a filename, or with an empty one, are plain form fields and
/// are skipped.
pub async fn require_file(mut multipart: Multipart) -> Result<NewFile, AppError> {
    let mut file: Option<NewFile> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let Some(raw_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        if raw_name.trim().is_empty() {
            continue;
        }

        let field_name = field.name().unwrap_or_default().to_string();
        if field_name != FILE_FIELD {
            return Err(AppError::MalformedRequest(format!(
                "Unexpected file field '{}'",
                field_name
            )));
        }
        if file.is_some() {
            return Err(AppError::MalformedRequest(
                "Multiple file fields are not allowed; send exactly one field named 'file'"
                    .to_string(),
            ));
        }

        let file_name = base_file_name(&raw_name)?;
        let content_type = field
            .content_type()
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();
        let data = field.bytes().await.map_err(multipart_error)?;

        file = Some(NewFile::new(file_name, content_type, data));
    }

    file.ok_or_else(|| AppError::MalformedRequest("No file provided".to_string()))
}
