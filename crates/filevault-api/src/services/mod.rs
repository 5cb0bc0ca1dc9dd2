//! Orchestrators that sit between the HTTP handlers and the storage adapters.

pub mod file_service;
pub mod health_service;

pub use file_service::FileService;
pub use health_service::HealthService;
