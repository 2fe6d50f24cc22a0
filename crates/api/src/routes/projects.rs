//! Route definitions for the `/projects` resource, including votes and
//! comments nested under a project.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{comment, project, vote};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                  -> list (active launch, by rating)
/// POST   /                  -> create
/// GET    /{id}              -> get_by_id
/// PUT    /{id}              -> update (owner)
/// DELETE /{id}              -> delete (owner)
/// POST   /{id}/vote         -> cast
/// DELETE /{id}/vote         -> retract
/// GET    /{id}/comments     -> list_by_project
/// POST   /{id}/comments     -> create
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(project::list).post(project::create))
        .route(
            "/{id}",
            get(project::get_by_id)
                .put(project::update)
                .delete(project::delete),
        )
        .route("/{id}/vote", post(vote::cast).delete(vote::retract))
        .route(
            "/{id}/comments",
            get(comment::list_by_project).post(comment::create),
        )
}
