//! Database repositories for the data access layer
//!
//! Each repository sits behind a trait so the orchestrators can be exercised
//! against in-memory stores.

pub mod files;
pub mod health;

pub use files::{FileMetadataStore, FileRepository};
pub use health::{HealthCheckRepository, HealthCheckStore};
