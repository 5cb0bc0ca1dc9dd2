//! Storage setup and initialization

use anyhow::Result;
use filevault_core::Config;
use filevault_storage::{create_storage, BlobStore};
use std::sync::Arc;

pub async fn setup_storage(config: &Config) -> Result<Arc<dyn BlobStore>> {
    tracing::info!("Initializing blob storage...");
    let storage = create_storage(config).await?;
    tracing::info!(
        backend = %storage.backend_type(),
        bucket = config.s3_bucket().unwrap_or_default(),
        "Blob storage initialized successfully"
    );

    Ok(storage)
}
