use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, Uri},
    Json,
};
use filevault_core::models::FileResponse;

use crate::error::HttpAppError;
use crate::state::AppState;
use crate::validation::{reject_body, reject_query, require_file_id};

/// Return a file's metadata when its blob is still present.
#[tracing::instrument(skip_all, fields(operation = "get_file"))]
pub async fn get_file(
    State(state): State<Arc<AppState>>,
    Path(params): Path<HashMap<String, String>>,
    uri: Uri,
    headers: HeaderMap,
) -> Result<Json<FileResponse>, HttpAppError> {
    let id = require_file_id(&params)?;
    reject_query(&uri)?;
    reject_body(&headers)?;

    let record = state.files.fetch(id).await?;

    Ok(Json(FileResponse::from(record)))
}
