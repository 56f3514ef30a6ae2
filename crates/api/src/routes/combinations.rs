//! Route definitions for the `/combinations` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::combinations;
use crate::state::AppState;

/// Routes mounted at `/combinations`.
///
/// ```text
/// GET    /           -> list
/// GET    /generate   -> generate
/// POST   /generate   -> generate
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(combinations::list)).route(
        "/generate",
        get(combinations::generate).post(combinations::generate),
    )
}
