use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One successful health probe, as persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct HealthCheckRecord {
    pub check_id: i64,
    pub checked_at: DateTime<Utc>,
}
