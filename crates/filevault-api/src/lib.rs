//! Filevault API Library
//!
//! HTTP handlers, request validation, orchestration services and application
//! setup for the file storage API.

pub mod error;
pub mod handlers;
pub mod services;
pub mod setup;
pub mod state;
mod telemetry;
pub mod validation;

// Re-exports
pub use error::HttpAppError;
pub use services::{FileService, HealthService};
pub use state::AppState;
