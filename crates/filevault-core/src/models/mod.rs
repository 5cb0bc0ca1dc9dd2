//! Data models for the application

mod file;
mod health;
mod storage;

pub use file::*;
pub use health::*;
pub use storage::*;
