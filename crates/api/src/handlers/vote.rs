//! Handlers for voting on projects.

use axum::extract::{Path, State};
use axum::Json;
use scout_core::types::DbId;
use scout_db::models::vote::Vote;
use scout_voting::VoteChange;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Vote state of a project after a cast or retract.
#[derive(Debug, Serialize)]
pub struct VoteStatus {
    pub project_id: DbId,
    pub voted: bool,
    /// `false` when the request did not change anything.
    pub changed: bool,
    pub upvotes: i32,
    pub rating: i32,
}

/// POST /api/v1/projects/{id}/vote
pub async fn cast(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<VoteStatus>>> {
    let change = state.ledger.cast(auth.user_id, project_id).await?;
    status(&state, project_id, true, change).await
}

/// DELETE /api/v1/projects/{id}/vote
pub async fn retract(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<VoteStatus>>> {
    let change = state.ledger.retract(auth.user_id, project_id).await?;
    status(&state, project_id, false, change).await
}

/// GET /api/v1/votes
///
/// The caller's votes across launches, newest first.
pub async fn list_mine(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Vote>>>> {
    let votes = state.ledger.votes_for_user(auth.user_id).await?;
    Ok(Json(DataResponse { data: votes }))
}

async fn status(
    state: &AppState,
    project_id: DbId,
    voted: bool,
    change: VoteChange,
) -> AppResult<Json<DataResponse<VoteStatus>>> {
    let project = state.catalog.get(project_id).await?;
    Ok(Json(DataResponse {
        data: VoteStatus {
            project_id,
            voted,
            changed: change == VoteChange::Applied,
            upvotes: project.upvotes,
            rating: project.rating,
        },
    }))
}
