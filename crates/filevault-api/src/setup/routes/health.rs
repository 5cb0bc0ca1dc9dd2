//! Health check routes.

use crate::handlers::{health::health_check, method_not_allowed};
use crate::state::AppState;
use axum::{routing::get, Router};
use std::sync::Arc;

pub(super) fn routes() -> Router<Arc<AppState>> {
    let health = get(health_check)
        .head(method_not_allowed)
        .fallback(method_not_allowed);

    Router::new()
        .route("/healthz", health.clone())
        .route("/cicd", health)
}
