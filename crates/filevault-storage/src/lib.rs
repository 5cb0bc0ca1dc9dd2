//! Filevault Storage Library
//!
//! Blob storage abstraction and its S3 and local filesystem implementations.
//!
//! # Key format
//!
//! Every backend addresses objects by `(bucket, key)` where the key is
//! `{file_id}/{file_name}`. Keys must not contain `.` or `..` segments or a
//! leading `/`. Key generation lives in the `keys` module.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use filevault_core::StorageBackend;
pub use keys::file_key;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{BlobStore, StorageError, StorageResult};
