//! Handlers for the `/people` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use pairblend_core::error::CoreError;
use pairblend_core::registration::{normalize_name, validate_image_url};
use pairblend_db::models::person::{CreatePerson, Person};
use pairblend_db::repositories::PersonRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/people
///
/// Registers a person, then starts a combination run in the background so
/// their pairs get generated without the caller waiting.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreatePerson>,
) -> AppResult<(StatusCode, Json<Person>)> {
    let name = normalize_name(&input.name)?;
    let image = input.image.trim().to_string();
    validate_image_url(&image)?;

    let person = match PersonRepo::create(&state.pool, &CreatePerson { name, image }).await {
        Ok(person) => person,
        Err(e) if pairblend_db::is_unique_violation(&e) => {
            return Err(CoreError::Conflict(format!(
                "A person named '{}' is already registered",
                input.name.trim()
            ))
            .into());
        }
        Err(e) => return Err(e.into()),
    };
    tracing::info!(person_id = person.id, name = %person.name, "Person registered");

    match &state.worker {
        Ok(worker) => {
            worker.spawn();
        }
        Err(e) => {
            tracing::warn!(error = %e, "Combination worker not configured, skipping run");
        }
    }

    Ok((StatusCode::CREATED, Json(person)))
}

/// GET /api/v1/people
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Person>>>> {
    let people = PersonRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: people }))
}
