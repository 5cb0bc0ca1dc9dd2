//! Test helpers: build AppState and router for integration tests.
//!
//! The router is the production one from `setup::routes`; only the stores
//! are swapped for in-memory versions, so no database or bucket is needed.

#![allow(dead_code)]

pub mod stores;

use axum_test::TestServer;
use filevault_api::services::{FileService, HealthService};
use filevault_api::setup::routes::setup_routes;
use filevault_api::state::AppState;
use filevault_core::{Config, FileServiceConfig};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::Ordering;

use stores::{MemoryBlobStore, MemoryHealthStore, MemoryMetadataStore};

pub const TEST_BUCKET: &str = "test-bucket";

/// Test application: server plus handles on the stores behind it.
pub struct TestApp {
    pub server: TestServer,
    pub blobs: Arc<MemoryBlobStore>,
    pub metadata: Arc<MemoryMetadataStore>,
    pub health: Arc<MemoryHealthStore>,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub fn metadata_unavailable(&self) {
        self.metadata.unavailable.store(true, Ordering::SeqCst);
    }
}

pub fn create_test_config() -> Config {
    let vars = HashMap::from([
        ("DATABASE_URL", "postgres://test@localhost/filevault_test"),
        ("S3_BUCKET", TEST_BUCKET),
        ("STORAGE_BACKEND", "local"),
        ("LOCAL_STORAGE_PATH", "/tmp/filevault-test"),
        ("MAX_FILE_SIZE_MB", "1"),
    ]);
    let config = FileServiceConfig::from_vars(|key| vars.get(key).map(|v| v.to_string()))
        .expect("Failed to build test config");
    Config(Box::new(config))
}

/// Setup test app with in-memory stores.
pub fn setup_test_app() -> TestApp {
    let blobs = Arc::new(MemoryBlobStore::default());
    let metadata = Arc::new(MemoryMetadataStore::default());
    let health = Arc::new(MemoryHealthStore::default());

    let state = Arc::new(AppState {
        config: create_test_config(),
        files: FileService::new(blobs.clone(), metadata.clone(), TEST_BUCKET),
        health: HealthService::new(health.clone()),
    });

    let app = setup_routes(state);
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        blobs,
        metadata,
        health,
    }
}
