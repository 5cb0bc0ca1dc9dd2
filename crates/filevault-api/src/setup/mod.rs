//! Application setup and initialization
//!
//! Startup steps extracted from main.rs so tests can build the same router.

pub mod database;
pub mod routes;
pub mod server;
pub mod services;
pub mod storage;

use anyhow::{Context, Result};
use filevault_core::Config;
use sqlx::PgPool;

/// Initialize the entire application
///
/// Returns the pool alongside the router so the caller can close it after
/// the server stops.
pub async fn initialize_app(config: &Config) -> Result<(PgPool, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config
        .validate()
        .context("Configuration validation failed")?;

    crate::telemetry::init_telemetry(config.log_format())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!("Configuration loaded and validated successfully");

    let pool = database::setup_database(config).await?;
    let storage = storage::setup_storage(config).await?;
    let state = services::initialize_services(config, pool.clone(), storage)?;
    let router = routes::setup_routes(state);

    Ok((pool, router))
}
