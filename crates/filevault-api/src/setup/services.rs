//! Service and repository wiring

use anyhow::Result;
use filevault_core::Config;
use filevault_db::{FileRepository, HealthCheckRepository};
use filevault_storage::BlobStore;
use sqlx::PgPool;
use std::sync::Arc;

use crate::services::{FileService, HealthService};
use crate::state::AppState;

/// Build the repositories over `pool` and the orchestrators over them.
pub fn initialize_services(
    config: &Config,
    pool: PgPool,
    storage: Arc<dyn BlobStore>,
) -> Result<Arc<AppState>> {
    let bucket = config
        .s3_bucket()
        .ok_or_else(|| anyhow::anyhow!("S3_BUCKET must be set"))?;

    let files = FileService::new(
        storage,
        Arc::new(FileRepository::new(pool.clone())),
        bucket,
    );
    let health = HealthService::new(Arc::new(HealthCheckRepository::new(pool)));

    Ok(Arc::new(AppState {
        config: config.clone(),
        files,
        health,
    }))
}
