use axum::routing::{get, put};
use axum::Router;

use crate::handlers::profile;
use crate::state::AppState;

/// Routes mounted at `/profile`. All require auth.
///
/// ```text
/// GET  /         -> get_profile
/// PUT  /         -> update_profile
/// DELETE /       -> deactivate
/// PUT  /avatar   -> update_avatar
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(profile::get_profile)
                .put(profile::update_profile)
                .delete(profile::deactivate),
        )
        .route("/avatar", put(profile::update_avatar))
}
