//! File lifecycle orchestration across the blob store and the metadata store.
//!
//! The two stores are written one after the other with no transaction and no
//! compensation:
//! - create writes the blob first; a failed metadata write leaves an orphaned blob.
//! - remove deletes the blob first; a failed metadata delete leaves dangling
//!   metadata, which `fetch` then reports as not found.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use filevault_core::models::{FileRecord, Location, NewFile};
use filevault_core::AppError;
use filevault_db::{DbError, FileMetadataStore};
use filevault_storage::{file_key, BlobStore};
use uuid::Uuid;

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

/// Map a metadata failure, keeping connectivity faults distinct.
fn metadata_error(err: DbError, other: fn(String) -> AppError) -> AppError {
    match err {
        DbError::Unavailable(_) => AppError::MetadataUnavailable(err.to_string()),
        DbError::Query(_) => other(err.to_string()),
    }
}

#[derive(Clone)]
pub struct FileService {
    blobs: Arc<dyn BlobStore>,
    metadata: Arc<dyn FileMetadataStore>,
    bucket: String,
}

impl FileService {
    pub fn new(
        blobs: Arc<dyn BlobStore>,
        metadata: Arc<dyn FileMetadataStore>,
        bucket: impl Into<String>,
    ) -> Self {
        Self {
            blobs,
            metadata,
            bucket: bucket.into(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Store the bytes, then persist the metadata row.
    #[tracing::instrument(
        skip(self, file),
        fields(file_name = %file.name, size_bytes = file.size_bytes())
    )]
    pub async fn create(&self, file: NewFile) -> Result<FileRecord, AppError> {
        let id = Uuid::new_v4();
        let key = file_key(id, &file.name);

        let start = Instant::now();
        self.blobs
            .put(&self.bucket, &key, file.data, &file.content_type)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    file_id = %id,
                    key = %key,
                    duration_ms = elapsed_ms(start),
                    "Blob write failed"
                );
                AppError::BlobWriteFailed(e.to_string())
            })?;
        tracing::debug!(
            file_id = %id,
            key = %key,
            duration_ms = elapsed_ms(start),
            "Blob written"
        );

        let record = FileRecord {
            id,
            file_name: file.name,
            url: Location::new(self.bucket.as_str(), key).to_string(),
            upload_date: Utc::now().date_naive(),
        };

        let start = Instant::now();
        let stored = self.metadata.create(&record).await.map_err(|e| {
            tracing::warn!(
                error = %e,
                file_id = %id,
                url = %record.url,
                duration_ms = elapsed_ms(start),
                "Metadata write failed; blob left orphaned"
            );
            metadata_error(e, AppError::MetadataWriteFailed)
        })?;

        let stored = stored.ok_or_else(|| {
            tracing::warn!(
                file_id = %id,
                url = %record.url,
                "Metadata store returned no row; blob left orphaned"
            );
            AppError::RecordNotCreated(id.to_string())
        })?;

        tracing::info!(
            file_id = %id,
            url = %stored.url,
            duration_ms = elapsed_ms(start),
            "File created"
        );
        Ok(stored)
    }

    /// Look up a record and confirm its blob still exists.
    #[tracing::instrument(skip(self), fields(file_id = %id))]
    pub async fn fetch(&self, id: Uuid) -> Result<FileRecord, AppError> {
        let record = self.find(id).await?;

        let location = Location::parse(&record.url).ok_or_else(|| {
            AppError::BlobProbeFailed(format!("Unparseable location: {}", record.url))
        })?;

        let start = Instant::now();
        let present = self
            .blobs
            .exists(&location.bucket, &location.key)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    url = %record.url,
                    duration_ms = elapsed_ms(start),
                    "Blob probe failed"
                );
                AppError::BlobProbeFailed(e.to_string())
            })?;

        if !present {
            tracing::warn!(
                url = %record.url,
                duration_ms = elapsed_ms(start),
                "Dangling metadata: blob missing"
            );
            return Err(AppError::NotFound(format!("File {} not found", id)));
        }

        tracing::debug!(duration_ms = elapsed_ms(start), "File fetched");
        Ok(record)
    }

    /// Delete the blob, then the metadata row. Returns the record as it was.
    #[tracing::instrument(skip(self), fields(file_id = %id))]
    pub async fn remove(&self, id: Uuid) -> Result<FileRecord, AppError> {
        let record = self.find(id).await?;

        let location = Location::parse(&record.url).ok_or_else(|| {
            AppError::BlobDeleteFailed(format!("Unparseable location: {}", record.url))
        })?;

        let start = Instant::now();
        self.blobs
            .delete(&location.bucket, &location.key)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    url = %record.url,
                    duration_ms = elapsed_ms(start),
                    "Blob delete failed"
                );
                AppError::BlobDeleteFailed(e.to_string())
            })?;

        let start = Instant::now();
        let deleted = self.metadata.delete(id).await.map_err(|e| {
            tracing::warn!(
                error = %e,
                url = %record.url,
                duration_ms = elapsed_ms(start),
                "Metadata delete failed; metadata left dangling"
            );
            metadata_error(e, AppError::MetadataDeleteFailed)
        })?;

        if !deleted {
            return Err(AppError::NotFound(format!("File {} not found", id)));
        }

        tracing::info!(duration_ms = elapsed_ms(start), "File removed");
        Ok(record)
    }

    async fn find(&self, id: Uuid) -> Result<FileRecord, AppError> {
        let start = Instant::now();
        let found = self
            .metadata
            .find_by_id(id)
            .await
            .map_err(|e| metadata_error(e, AppError::MetadataReadFailed))?;
        tracing::debug!(
            found = found.is_some(),
            duration_ms = elapsed_ms(start),
            "Metadata lookup"
        );

        found.ok_or_else(|| AppError::NotFound(format!("File {} not found", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bytes::Bytes;
    use filevault_db::DbResult;
    use filevault_storage::{StorageBackend, StorageError, StorageResult};
    use std::collections::{HashMap, HashSet};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    const BUCKET: &str = "uploads";

    #[derive(Default)]
    struct MemoryBlobs {
        objects: Mutex<HashSet<(String, String)>>,
        calls: AtomicUsize,
        fail_put: bool,
        fail_delete: bool,
    }

    #[async_trait]
    impl BlobStore for MemoryBlobs {
        async fn put(
            &self,
            bucket: &str,
            key: &str,
            _data: Bytes,
            _content_type: &str,
        ) -> StorageResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_put {
                return Err(StorageError::UploadFailed("injected".to_string()));
            }
            self.objects
                .lock()
                .unwrap()
                .insert((bucket.to_string(), key.to_string()));
            Ok(())
        }

        async fn delete(&self, bucket: &str, key: &str) -> StorageResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_delete {
                return Err(StorageError::DeleteFailed("injected".to_string()));
            }
            self.objects
                .lock()
                .unwrap()
                .remove(&(bucket.to_string(), key.to_string()));
            Ok(())
        }

        async fn exists(&self, bucket: &str, key: &str) -> StorageResult<bool> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self
                .objects
                .lock()
                .unwrap()
                .contains(&(bucket.to_string(), key.to_string())))
        }

        fn backend_type(&self) -> StorageBackend {
            StorageBackend::Local
        }
    }

    #[derive(Clone, Copy, PartialEq)]
    enum Fault {
        None,
        Unavailable,
        Query,
    }

    impl Fault {
        fn check(self) -> DbResult<()> {
            match self {
                Fault::None => Ok(()),
                Fault::Unavailable => Err(DbError::from(sqlx::Error::PoolTimedOut)),
                Fault::Query => Err(DbError::from(sqlx::Error::RowNotFound)),
            }
        }
    }

    struct MemoryMetadata {
        rows: Mutex<HashMap<Uuid, FileRecord>>,
        create_fault: Fault,
        find_fault: Fault,
        delete_fault: Fault,
        drop_created: bool,
    }

    impl Default for MemoryMetadata {
        fn default() -> Self {
            Self {
                rows: Mutex::new(HashMap::new()),
                create_fault: Fault::None,
                find_fault: Fault::None,
                delete_fault: Fault::None,
                drop_created: false,
            }
        }
    }

    #[async_trait]
    impl FileMetadataStore for MemoryMetadata {
        async fn create(&self, record: &FileRecord) -> DbResult<Option<FileRecord>> {
            self.create_fault.check()?;
            if self.drop_created {
                return Ok(None);
            }
            self.rows.lock().unwrap().insert(record.id, record.clone());
            Ok(Some(record.clone()))
        }

        async fn find_by_id(&self, id: Uuid) -> DbResult<Option<FileRecord>> {
            self.find_fault.check()?;
            Ok(self.rows.lock().unwrap().get(&id).cloned())
        }

        async fn delete(&self, id: Uuid) -> DbResult<bool> {
            self.delete_fault.check()?;
            Ok(self.rows.lock().unwrap().remove(&id).is_some())
        }
    }

    fn service(
        blobs: MemoryBlobs,
        metadata: MemoryMetadata,
    ) -> (FileService, Arc<MemoryBlobs>, Arc<MemoryMetadata>) {
        let blobs = Arc::new(blobs);
        let metadata = Arc::new(metadata);
        let service = FileService::new(blobs.clone(), metadata.clone(), BUCKET);
        (service, blobs, metadata)
    }

    fn upload(name: &str) -> NewFile {
        NewFile::new(name, "image/jpeg", Bytes::from_static(b"fake image content"))
    }

    #[tokio::test]
    async fn test_create_issues_fresh_ids_embedded_in_location() {
        let (service, _, _) = service(MemoryBlobs::default(), MemoryMetadata::default());

        let first = service.create(upload("test.jpg")).await.unwrap();
        let second = service.create(upload("test.jpg")).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(first.url, format!("uploads/{}/test.jpg", first.id));
        assert_eq!(first.file_name, "test.jpg");
        assert_eq!(first.upload_date, Utc::now().date_naive());
    }

    #[tokio::test]
    async fn test_fetch_returns_created_record() {
        let (service, _, _) = service(MemoryBlobs::default(), MemoryMetadata::default());

        let created = service.create(upload("a.png")).await.unwrap();
        let fetched = service.fetch(created.id).await.unwrap();

        assert_eq!(created, fetched);
    }

    #[tokio::test]
    async fn test_fetch_dangling_metadata_is_not_found() {
        let (service, blobs, metadata) =
            service(MemoryBlobs::default(), MemoryMetadata::default());

        let created = service.create(upload("a.png")).await.unwrap();
        blobs.objects.lock().unwrap().clear();

        let err = service.fetch(created.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        // Metadata is reported missing but not deleted.
        assert!(metadata.rows.lock().unwrap().contains_key(&created.id));
    }

    #[tokio::test]
    async fn test_remove_then_fetch_is_not_found() {
        let (service, blobs, _) = service(MemoryBlobs::default(), MemoryMetadata::default());

        let created = service.create(upload("a.png")).await.unwrap();
        let removed = service.remove(created.id).await.unwrap();

        assert_eq!(removed, created);
        assert!(blobs.objects.lock().unwrap().is_empty());
        assert!(matches!(
            service.fetch(created.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_remove_unknown_id_skips_blob_store() {
        let (service, blobs, _) = service(MemoryBlobs::default(), MemoryMetadata::default());

        let err = service.remove(Uuid::new_v4()).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(blobs.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_create_blob_failure_skips_metadata() {
        let blobs = MemoryBlobs {
            fail_put: true,
            ..Default::default()
        };
        let (service, _, metadata) = service(blobs, MemoryMetadata::default());

        let err = service.create(upload("a.png")).await.unwrap_err();

        assert!(matches!(err, AppError::BlobWriteFailed(_)));
        assert!(metadata.rows.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_metadata_failure_leaves_orphaned_blob() {
        let metadata = MemoryMetadata {
            create_fault: Fault::Query,
            ..Default::default()
        };
        let (service, blobs, _) = service(MemoryBlobs::default(), metadata);

        let err = service.create(upload("a.png")).await.unwrap_err();

        assert!(matches!(err, AppError::MetadataWriteFailed(_)));
        assert_eq!(blobs.objects.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_metadata_unavailable() {
        let metadata = MemoryMetadata {
            create_fault: Fault::Unavailable,
            ..Default::default()
        };
        let (service, _, _) = service(MemoryBlobs::default(), metadata);

        let err = service.create(upload("a.png")).await.unwrap_err();
        assert!(matches!(err, AppError::MetadataUnavailable(_)));
    }

    #[tokio::test]
    async fn test_create_without_returned_row() {
        let metadata = MemoryMetadata {
            drop_created: true,
            ..Default::default()
        };
        let (service, _, _) = service(MemoryBlobs::default(), metadata);

        let err = service.create(upload("a.png")).await.unwrap_err();
        assert!(matches!(err, AppError::RecordNotCreated(_)));
    }

    #[tokio::test]
    async fn test_fetch_lookup_faults() {
        for (fault, unavailable) in [(Fault::Unavailable, true), (Fault::Query, false)] {
            let metadata = MemoryMetadata {
                find_fault: fault,
                ..Default::default()
            };
            let (service, _, _) = service(MemoryBlobs::default(), metadata);

            let err = service.fetch(Uuid::new_v4()).await.unwrap_err();
            if unavailable {
                assert!(matches!(err, AppError::MetadataUnavailable(_)));
            } else {
                assert!(matches!(err, AppError::MetadataReadFailed(_)));
            }
        }
    }

    #[tokio::test]
    async fn test_fetch_unparseable_location() {
        let (service, _, metadata) = service(MemoryBlobs::default(), MemoryMetadata::default());
        let id = Uuid::new_v4();
        metadata.rows.lock().unwrap().insert(
            id,
            FileRecord {
                id,
                file_name: "a.png".to_string(),
                url: "no-separator".to_string(),
                upload_date: Utc::now().date_naive(),
            },
        );

        assert!(matches!(
            service.fetch(id).await,
            Err(AppError::BlobProbeFailed(_))
        ));
        assert!(matches!(
            service.remove(id).await,
            Err(AppError::BlobDeleteFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_remove_blob_failure_keeps_metadata() {
        let blobs = MemoryBlobs {
            fail_delete: true,
            ..Default::default()
        };
        let (service, _, metadata) = service(blobs, MemoryMetadata::default());

        let created = service.create(upload("a.png")).await.unwrap();
        let err = service.remove(created.id).await.unwrap_err();

        assert!(matches!(err, AppError::BlobDeleteFailed(_)));
        assert!(metadata.rows.lock().unwrap().contains_key(&created.id));
    }

    #[tokio::test]
    async fn test_remove_metadata_failure_leaves_dangling_record() {
        let metadata = MemoryMetadata {
            delete_fault: Fault::Query,
            ..Default::default()
        };
        let (service, _, _) = service(MemoryBlobs::default(), metadata);

        let created = service.create(upload("a.png")).await.unwrap();
        let err = service.remove(created.id).await.unwrap_err();
        assert!(matches!(err, AppError::MetadataDeleteFailed(_)));

        // The blob is gone, so the record now reads as missing.
        assert!(matches!(
            service.fetch(created.id).await,
            Err(AppError::NotFound(_))
        ));
    }
}
