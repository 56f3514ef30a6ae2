pub mod combinations;
pub mod health;
pub mod people;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /people                       list, register
/// /combinations                 list
/// /combinations/generate        run the combination worker (GET, POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/people", people::router())
        .nest("/combinations", combinations::router())
}
