//! Handlers for the `/projects` resource.
//!
//! Reads are public; writes need a signed-in caller and edits are limited to
//! the project's owner.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use scout_core::types::DbId;
use scout_db::models::project::{CreateProject, Project, UpdateProject};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/projects
///
/// Submissions to the running launch, highest rating first. Responds 409
/// `NO_ACTIVE_LAUNCH` between launches.
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    let data = state.catalog.list_active().await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Project>>> {
    let data = state.catalog.get(id).await?;
    Ok(Json(DataResponse { data }))
}

/// POST /api/v1/projects
///
/// Submits into whichever launch is active right now.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<Project>)> {
    let project = state.catalog.create(input, auth.user_id).await?;
    tracing::info!(
        project_id = project.id,
        launch_id = project.launch_id,
        user_id = auth.user_id,
        "Project submitted",
    );
    Ok((StatusCode::CREATED, Json(project)))
}

/// PUT /api/v1/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<Project>> {
    state
        .catalog
        .update(id, auth.user_id, input)
        .await
        .map(Json)
        .map_err(Into::into)
}

/// DELETE /api/v1/projects/{id}
///
/// Votes and comments go with the project.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    state.catalog.delete(id, auth.user_id).await?;
    tracing::info!(project_id = id, user_id = auth.user_id, "Project deleted");
    Ok(StatusCode::NO_CONTENT)
}
