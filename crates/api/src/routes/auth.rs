//! Route definitions for the `/auth` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /email/register  -> register_email
/// POST /email/login     -> login_email
/// POST /yandex          -> login_yandex
/// POST /telegram/link   -> link_telegram (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/email/register", post(auth::register_email))
        .route("/email/login", post(auth::login_email))
        .route("/yandex", post(auth::login_yandex))
        .route("/telegram/link", post(auth::link_telegram))
}
