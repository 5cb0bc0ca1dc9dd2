//! Health check repository: connectivity probe and the health_checks table.

use async_trait::async_trait;
use filevault_core::models::HealthCheckRecord;
use sqlx::{PgPool, Postgres};

use crate::error::DbResult;

#[async_trait]
pub trait HealthCheckStore: Send + Sync {
    /// Round-trip a trivial query to prove the database is reachable.
    async fn ping(&self) -> DbResult<()>;

    /// Append a health check row stamped by the database clock.
    async fn insert(&self) -> DbResult<HealthCheckRecord>;
}

#[derive(Clone)]
pub struct HealthCheckRepository {
    pool: PgPool,
}

impl HealthCheckRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HealthCheckStore for HealthCheckRepository {
    #[tracing::instrument(skip(self), fields(db.operation = "ping"))]
    async fn ping(&self) -> DbResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(db.table = "health_checks"))]
    async fn insert(&self) -> DbResult<HealthCheckRecord> {
        let row = sqlx::query_as::<Postgres, HealthCheckRecord>(
            "INSERT INTO health_checks DEFAULT VALUES RETURNING check_id, checked_at",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }
}
