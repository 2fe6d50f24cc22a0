//! Handlers for the caller's own profile.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use scout_core::error::CoreError;
use scout_core::validation::validate_username;
use scout_db::models::user::{UpdateUser, UserResponse};
use scout_db::repositories::UserRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AvatarRequest {
    pub avatar: String,
}

/// GET /api/v1/profile
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| CoreError::user_not_found(auth.user_id))?;
    Ok(Json(DataResponse {
        data: UserResponse::from(&user),
    }))
}

/// PUT /api/v1/profile
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<UpdateUser>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    if let Some(username) = &input.username {
        validate_username(username).map_err(CoreError::Validation)?;
        if let Some(other) = UserRepo::find_by_username(&state.pool, username).await? {
            if other.id != auth.user_id {
                return Err(AppError::Core(CoreError::Conflict(
                    "Username is already taken".into(),
                )));
            }
        }
    }
    apply_update(&state, auth, &input).await
}

/// PUT /api/v1/profile/avatar
pub async fn update_avatar(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<AvatarRequest>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let avatar = input.avatar.trim();
    if avatar.is_empty() {
        return Err(AppError::BadRequest("Avatar URL is required".into()));
    }
    let update = UpdateUser {
        avatar: Some(avatar.to_string()),
        ..Default::default()
    };
    apply_update(&state, auth, &update).await
}

/// DELETE /api/v1/profile
///
/// Deactivate the caller's account. Projects, votes and comments stay; the
/// account can no longer log in and drops out of the user count.
pub async fn deactivate(State(state): State<AppState>, auth: AuthUser) -> AppResult<StatusCode> {
    if !UserRepo::deactivate(&state.pool, auth.user_id).await? {
        return Err(CoreError::user_not_found(auth.user_id).into());
    }
    tracing::info!(user_id = auth.user_id, "Account deactivated");
    Ok(StatusCode::NO_CONTENT)
}

async fn apply_update(
    state: &AppState,
    auth: AuthUser,
    input: &UpdateUser,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = UserRepo::update(&state.pool, auth.user_id, input)
        .await?
        .ok_or_else(|| CoreError::user_not_found(auth.user_id))?;
    Ok(Json(DataResponse {
        data: UserResponse::from(&user),
    }))
}
