//! Handlers for the `/users` resource.

use axum::extract::{Path, State};
use axum::Json;
use scout_core::error::CoreError;
use scout_core::types::DbId;
use scout_db::models::project::Project;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/users/{id}/projects
///
/// Users may only list their own submissions.
pub async fn list_projects(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    if auth.user_id != user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Cannot list another user's projects".into(),
        )));
    }
    let projects = state.catalog.list_by_owner(user_id).await?;
    Ok(Json(DataResponse { data: projects }))
}
