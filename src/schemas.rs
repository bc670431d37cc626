use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Directory holding the built dashboard
    pub static_dir: PathBuf,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Whether the dashboard bundle is present
    pub dashboard: String,
}
