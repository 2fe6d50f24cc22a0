//! Liveness probe, mounted at the root rather than under `/api/v1`.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use scout_core::types::{DbId, Timestamp};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ActiveLaunchSummary {
    pub id: DbId,
    pub name: String,
    pub end_date: Timestamp,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok` when the database answers, `degraded` otherwise.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// `None` until the rotation job has opened a launch.
    pub active_launch: Option<ActiveLaunchSummary>,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = scout_db::health_check(&state.pool).await.is_ok();

    let active_launch = if db_healthy {
        state
            .lifecycle
            .get_active()
            .await
            .ok()
            .map(|launch| ActiveLaunchSummary {
                id: launch.id,
                name: launch.name,
                end_date: launch.end_date,
            })
    } else {
        None
    };

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        active_launch,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
