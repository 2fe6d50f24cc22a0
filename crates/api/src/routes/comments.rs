use axum::routing::put;
use axum::Router;

use crate::handlers::comment;
use crate::state::AppState;

/// Routes mounted at `/comments`.
///
/// ```text
/// PUT    /{id}  -> update (author)
/// DELETE /{id}  -> delete (author)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", put(comment::update).delete(comment::delete))
}
