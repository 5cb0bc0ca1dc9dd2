//! Application state shared by every handler.

use filevault_core::Config;

use crate::services::{FileService, HealthService};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub files: FileService,
    pub health: HealthService,
}
