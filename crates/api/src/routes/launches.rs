use axum::routing::get;
use axum::Router;

use crate::handlers::launch;
use crate::state::AppState;

/// Routes mounted at `/launches`.
///
/// ```text
/// GET /                 -> list
/// GET /active           -> get_active
/// GET /{id}/projects    -> list_projects (?ordered=false for submission order)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(launch::list))
        .route("/active", get(launch::get_active))
        .route("/{id}/projects", get(launch::list_projects))
}
