use axum::extract::State;
use axum::Json;
use scout_db::repositories::UserRepo;
use serde::Serialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct Stats {
    /// Users that are not deactivated.
    pub user_count: i64,
    /// Projects in the active launch.
    pub project_count: i64,
}

/// GET /api/v1/stats
pub async fn get_stats(State(state): State<AppState>) -> AppResult<Json<DataResponse<Stats>>> {
    let user_count = UserRepo::count_active(&state.pool).await?;
    let project_count = state.catalog.count_active().await?;
    Ok(Json(DataResponse {
        data: Stats {
            user_count,
            project_count,
        },
    }))
}
