//! Filevault DB Library
//!
//! Postgres repositories for file metadata and health checks.

pub mod db;
pub mod error;

pub use db::{FileMetadataStore, FileRepository, HealthCheckRepository, HealthCheckStore};
pub use error::{is_connection_error, DbError, DbResult};

/// Migrations for the files and health_checks tables.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations");
