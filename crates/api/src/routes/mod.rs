pub mod auth;
pub mod comments;
pub mod health;
pub mod launches;
pub mod profile;
pub mod projects;
pub mod users;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/email/register                 register (public)
/// /auth/email/login                    login (public)
/// /auth/yandex                         OAuth login (public)
/// /auth/telegram/link                  link Telegram (requires auth)
///
/// /profile                             get, update, deactivate own account
/// /profile/avatar                      update avatar
///
/// /projects                            active launch listing, submit
/// /projects/{id}                       get, update, delete (owner)
/// /projects/{id}/vote                  cast (POST), retract (DELETE)
/// /projects/{id}/comments              list, create
/// /comments/{id}                       update, delete (author)
///
/// /launches                            launch history
/// /launches/active                     current launch
/// /launches/{id}/projects              projects of a launch
///
/// /users/{id}/projects                 own submissions
/// /votes                               own votes
/// /stats                               user and project counts
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/profile", profile::router())
        .nest("/projects", projects::router())
        .nest("/comments", comments::router())
        .nest("/launches", launches::router())
        .nest("/users", users::router())
        .route("/votes", get(handlers::vote::list_mine))
        .route("/stats", get(handlers::stats::get_stats))
}
