//! File metadata repository: CRUD for the files table.

use async_trait::async_trait;
use filevault_core::models::FileRecord;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

use crate::error::DbResult;

/// Persistence for file metadata rows.
#[async_trait]
pub trait FileMetadataStore: Send + Sync {
    /// Insert a record and return the row as stored.
    ///
    /// `Ok(None)` means the database accepted the statement but returned no row.
    async fn create(&self, record: &FileRecord) -> DbResult<Option<FileRecord>>;

    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<FileRecord>>;

    /// Delete by id. Returns `false` when no row matched.
    async fn delete(&self, id: Uuid) -> DbResult<bool>;
}

/// Postgres-backed file metadata repository.
#[derive(Clone)]
pub struct FileRepository {
    pool: PgPool,
}

impl FileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FileMetadataStore for FileRepository {
    #[tracing::instrument(skip(self, record), fields(db.table = "files", db.record_id = %record.id))]
    async fn create(&self, record: &FileRecord) -> DbResult<Option<FileRecord>> {
        let row = sqlx::query_as::<Postgres, FileRecord>(
            r#"
            INSERT INTO files (id, file_name, url, upload_date)
            VALUES ($1, $2, $3, $4)
            RETURNING id, file_name, url, upload_date
            "#,
        )
        .bind(record.id)
        .bind(&record.file_name)
        .bind(&record.url)
        .bind(record.upload_date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    #[tracing::instrument(skip(self), fields(db.table = "files", db.record_id = %id))]
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<FileRecord>> {
        let row = sqlx::query_as::<Postgres, FileRecord>(
            "SELECT id, file_name, url, upload_date FROM files WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    #[tracing::instrument(skip(self), fields(db.table = "files", db.record_id = %id))]
    async fn delete(&self, id: Uuid) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM files WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
