//! Handlers for the `/combinations` resource.

use axum::extract::State;
use axum::Json;
use pairblend_db::models::combination::Combination;
use pairblend_db::repositories::CombinationRepo;
use pairblend_worker::RunSummary;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/combinations
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Combination>>>> {
    let combinations = CombinationRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: combinations }))
}

/// GET|POST /api/v1/combinations/generate
///
/// Runs the worker to completion and returns its summary. The run lives in
/// its own task, so a dropped connection or a request timeout does not cut
/// it short; results already paid for still get persisted.
pub async fn generate(State(state): State<AppState>) -> AppResult<Json<RunSummary>> {
    let worker = state.combination_worker()?;

    let summary = tokio::spawn(async move { worker.run().await })
        .await
        .map_err(|e| AppError::InternalError(format!("Combination run panicked: {e}")))??;

    Ok(Json(summary))
}
