use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode, Uri},
};

use crate::error::HttpAppError;
use crate::state::AppState;
use crate::validation::{reject_body, reject_query, require_file_id};

#[tracing::instrument(skip_all, fields(operation = "delete_file"))]
pub async fn delete_file(
    State(state): State<Arc<AppState>>,
    Path(params): Path<HashMap<String, String>>,
    uri: Uri,
    headers: HeaderMap,
) -> Result<StatusCode, HttpAppError> {
    let id = require_file_id(&params)?;
    reject_query(&uri)?;
    reject_body(&headers)?;

    let removed = state.files.remove(id).await?;
    tracing::debug!(file_id = %removed.id, file_name = %removed.file_name, "File deleted");

    Ok(StatusCode::NO_CONTENT)
}
