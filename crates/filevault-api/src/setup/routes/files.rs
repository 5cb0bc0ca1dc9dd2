use crate::handlers::{
    file_delete::delete_file, file_get::get_file, file_upload::upload_file, method_not_allowed,
    missing_file_id,
};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// `/v1/file` and `/v1/file/{id}`. HEAD is registered explicitly so it does
/// not fall through to the GET handler. `/v1/file/` has an empty id and is
/// rejected as malformed.
pub(super) fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/v1/file",
            post(upload_file)
                .head(method_not_allowed)
                .fallback(method_not_allowed),
        )
        .route(
            "/v1/file/",
            get(missing_file_id)
                .delete(missing_file_id)
                .head(method_not_allowed)
                .fallback(method_not_allowed),
        )
        .route(
            "/v1/file/{id}",
            get(get_file)
                .delete(delete_file)
                .head(method_not_allowed)
                .fallback(method_not_allowed),
        )
}
