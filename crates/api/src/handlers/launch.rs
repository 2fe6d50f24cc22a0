//! Handlers for the `/launches` resource.

use axum::extract::{Path, Query, State};
use axum::Json;
use scout_core::types::DbId;
use scout_db::models::launch::Launch;
use scout_db::models::project::Project;
use serde::Deserialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /launches/{id}/projects`.
#[derive(Debug, Deserialize)]
pub struct LaunchProjectsParams {
    /// Sort by rating (default) or keep submission order.
    pub ordered: Option<bool>,
}

/// GET /api/v1/launches
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Launch>>>> {
    let launches = state.lifecycle.list().await?;
    Ok(Json(DataResponse { data: launches }))
}

/// GET /api/v1/launches/active
pub async fn get_active(State(state): State<AppState>) -> AppResult<Json<DataResponse<Launch>>> {
    let launch = state.lifecycle.get_active().await?;
    Ok(Json(DataResponse { data: launch }))
}

/// GET /api/v1/launches/{id}/projects
pub async fn list_projects(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<LaunchProjectsParams>,
) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    let projects = state
        .catalog
        .list_by_launch(id, params.ordered.unwrap_or(true))
        .await?;
    Ok(Json(DataResponse { data: projects }))
}
