use axum::routing::get;
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET /{id}/projects  -> list_projects (self only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}/projects", get(user::list_projects))
}
