//! Application state shared across all handlers.

use std::sync::Arc;

use dropshare_core::config::AppConfig;
use dropshare_service::file::FileService;
use dropshare_service::share::ShareService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// File upload/download/delete/list service.
    pub file_service: Arc<FileService>,
    /// Share link service.
    pub share_service: Arc<ShareService>,
}
