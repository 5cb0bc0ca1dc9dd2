//! Health check handler shared by `/healthz` and `/cicd`.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use filevault_core::AppError;

use super::NO_CACHE_HEADERS;
use crate::error::HttpAppError;
use crate::state::AppState;
use crate::validation::{reject_body, reject_query};

/// Probe the metadata store, then record the check.
///
/// 200 with an empty body when both succeed, 503 when either fails.
pub async fn health_check(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    match run_check(&state, &uri, &headers).await {
        Ok(()) => (StatusCode::OK, NO_CACHE_HEADERS).into_response(),
        Err(e) => (NO_CACHE_HEADERS, HttpAppError(e)).into_response(),
    }
}

async fn run_check(state: &AppState, uri: &Uri, headers: &HeaderMap) -> Result<(), AppError> {
    reject_body(headers)?;
    reject_query(uri)?;

    if !state.health.check().await {
        return Err(AppError::MetadataUnavailable(
            "Metadata store probe failed".to_string(),
        ));
    }

    let record = state.health.record().await?;
    tracing::debug!(check_id = record.check_id, "Health check recorded");

    Ok(())
}
