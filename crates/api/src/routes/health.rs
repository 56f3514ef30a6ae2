use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Whether the generation API key and worker tuning loaded.
    pub worker_configured: bool,
}

/// GET /health -- returns service, database and worker health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = pairblend_db::health_check(&state.pool).await.is_ok();
    let worker_configured = state.worker.is_ok();

    let status = if db_healthy && worker_configured {
        "ok"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        worker_configured,
    })
}

/// Mount health check routes (root level, not under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
