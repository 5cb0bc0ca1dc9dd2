//! Route configuration and setup.
//!
//! File routes live in [files](files); health checks in [health](health).

mod files;
mod health;

use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Setup all application routes
pub fn setup_routes(state: Arc<AppState>) -> Router {
    let max_body_bytes = state.config.max_file_size_bytes();
    tracing::info!(max_body_bytes, "Upload body limit configured");

    Router::new()
        .merge(files::routes())
        .merge(health::routes())
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
