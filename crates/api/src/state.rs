use std::sync::Arc;

use pairblend_core::config::ConfigError;
use pairblend_worker::CombinationWorker;

use crate::config::ServerConfig;
use crate::error::AppError;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: pairblend_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// The combination worker, or the reason it could not be configured.
    /// The server still serves registration and listings without it.
    pub worker: Result<Arc<CombinationWorker>, ConfigError>,
}

impl AppState {
    /// The configured worker, or a configuration error for the response.
    pub fn combination_worker(&self) -> Result<Arc<CombinationWorker>, AppError> {
        self.worker
            .as_ref()
            .map(Arc::clone)
            .map_err(|e| AppError::Configuration(e.clone()))
    }
}
