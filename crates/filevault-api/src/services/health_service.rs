use std::sync::Arc;

use filevault_core::models::HealthCheckRecord;
use filevault_core::AppError;
use filevault_db::HealthCheckStore;

#[derive(Clone)]
pub struct HealthService {
    store: Arc<dyn HealthCheckStore>,
}

impl HealthService {
    pub fn new(store: Arc<dyn HealthCheckStore>) -> Self {
        Self { store }
    }

    /// Probe metadata store connectivity. Never errors.
    pub async fn check(&self) -> bool {
        match self.store.ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Metadata store probe failed");
                false
            }
        }
    }

    /// Persist a health check row.
    pub async fn record(&self) -> Result<HealthCheckRecord, AppError> {
        self.store.insert().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to record health check");
            AppError::HealthRecordFailed(e.to_string())
        })
    }
}
