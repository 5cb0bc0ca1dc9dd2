//! In-memory stores with switchable failures.

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use filevault_core::models::{FileRecord, HealthCheckRecord};
use filevault_db::{DbError, DbResult, FileMetadataStore, HealthCheckStore};
use filevault_storage::{BlobStore, StorageBackend, StorageError, StorageResult};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

fn unavailable() -> DbError {
    DbError::from(sqlx::Error::PoolTimedOut)
}

fn query_failed() -> DbError {
    DbError::from(sqlx::Error::Protocol("injected failure".to_string()))
}

#[derive(Default)]
pub struct MemoryBlobStore {
    objects: Mutex<HashMap<(String, String), (Bytes, String)>>,
    pub fail_writes: AtomicBool,
}

impl MemoryBlobStore {
    pub fn len(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    pub fn content_type(&self, bucket: &str, key: &str) -> Option<String> {
        self.objects
            .lock()
            .unwrap()
            .get(&(bucket.to_string(), key.to_string()))
            .map(|(_, content_type)| content_type.clone())
    }

    /// Remove an object behind the service's back.
    pub fn remove(&self, bucket: &str, key: &str) {
        self.objects
            .lock()
            .unwrap()
            .remove(&(bucket.to_string(), key.to_string()));
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(
        &self,
        bucket: &str,
        key: &str,
        data: Bytes,
        content_type: &str,
    ) -> StorageResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::UploadFailed("injected failure".to_string()));
        }
        self.objects.lock().unwrap().insert(
            (bucket.to_string(), key.to_string()),
            (data, content_type.to_string()),
        );
        Ok(())
    }

    async fn delete(&self, bucket: &str, key: &str) -> StorageResult<()> {
        self.remove(bucket, key);
        Ok(())
    }

    async fn exists(&self, bucket: &str, key: &str) -> StorageResult<bool> {
        Ok(self
            .objects
            .lock()
            .unwrap()
            .contains_key(&(bucket.to_string(), key.to_string())))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

#[derive(Default)]
pub struct MemoryMetadataStore {
    rows: Mutex<HashMap<Uuid, FileRecord>>,
    pub unavailable: AtomicBool,
    pub fail_writes: AtomicBool,
}

impl MemoryMetadataStore {
    pub fn contains(&self, id: Uuid) -> bool {
        self.rows.lock().unwrap().contains_key(&id)
    }

    fn check(&self) -> DbResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(())
    }
}

#[async_trait]
impl FileMetadataStore for MemoryMetadataStore {
    async fn create(&self, record: &FileRecord) -> DbResult<Option<FileRecord>> {
        self.check()?;
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(query_failed());
        }
        self.rows.lock().unwrap().insert(record.id, record.clone());
        Ok(Some(record.clone()))
    }

    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<FileRecord>> {
        self.check()?;
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn delete(&self, id: Uuid) -> DbResult<bool> {
        self.check()?;
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(query_failed());
        }
        Ok(self.rows.lock().unwrap().remove(&id).is_some())
    }
}

#[derive(Default)]
pub struct MemoryHealthStore {
    next_id: AtomicI64,
    pub ping_fails: AtomicBool,
    pub insert_fails: AtomicBool,
}

impl MemoryHealthStore {
    pub fn recorded(&self) -> i64 {
        self.next_id.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HealthCheckStore for MemoryHealthStore {
    async fn ping(&self) -> DbResult<()> {
        if self.ping_fails.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(())
    }

    async fn insert(&self) -> DbResult<HealthCheckRecord> {
        if self.insert_fails.load(Ordering::SeqCst) {
            return Err(query_failed());
        }
        let check_id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(HealthCheckRecord {
            check_id,
            checked_at: Utc::now(),
        })
    }
}
