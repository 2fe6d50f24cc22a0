//! Handlers for project comments.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use scout_core::error::CoreError;
use scout_core::types::DbId;
use scout_core::validation::validate_comment_content;
use scout_db::models::comment::{Comment, CommentContent, CommentWithAuthor};
use scout_db::repositories::CommentRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/projects/{id}/comments
pub async fn list_by_project(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<CommentWithAuthor>>>> {
    state.catalog.get(project_id).await?;
    let comments = CommentRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: comments }))
}

/// POST /api/v1/projects/{id}/comments
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(project_id): Path<DbId>,
    Json(input): Json<CommentContent>,
) -> AppResult<(StatusCode, Json<Comment>)> {
    validate_comment_content(&input.content).map_err(CoreError::Validation)?;
    state.catalog.get(project_id).await?;

    let comment =
        CommentRepo::create(&state.pool, auth.user_id, project_id, input.content.trim()).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

/// PUT /api/v1/comments/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<CommentContent>,
) -> AppResult<Json<Comment>> {
    validate_comment_content(&input.content).map_err(CoreError::Validation)?;
    find_own(&state, id, auth.user_id).await?;

    let comment = CommentRepo::update_content(&state.pool, id, input.content.trim())
        .await?
        .ok_or_else(|| comment_not_found(id))?;
    Ok(Json(comment))
}

/// DELETE /api/v1/comments/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    find_own(&state, id, auth.user_id).await?;

    if CommentRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(comment_not_found(id))
    }
}

/// Load a comment and require that `user_id` wrote it.
async fn find_own(state: &AppState, id: DbId, user_id: DbId) -> AppResult<Comment> {
    let comment = CommentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| comment_not_found(id))?;
    if comment.user_id != user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the author can modify this comment".into(),
        )));
    }
    Ok(comment)
}

fn comment_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Comment",
        id,
    })
}
