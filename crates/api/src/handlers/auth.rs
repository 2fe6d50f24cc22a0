//! Handlers for the `/auth` resource: email accounts, Yandex login and
//! Telegram linking.

use std::collections::BTreeMap;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use scout_core::error::CoreError;
use scout_core::identity::{AuthType, ExternalIdentity};
use scout_core::telegram::verify_login;
use scout_core::validation::{validate_email, validate_password_strength, validate_username};
use scout_db::models::user::{CreateUser, User, UserResponse};
use scout_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, verify_password};
use crate::auth::yandex::fetch_profile;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/email/register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
}

/// Request body for `POST /auth/email/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/yandex`.
#[derive(Debug, Deserialize)]
pub struct YandexLoginRequest {
    pub code: String,
}

/// Successful authentication response.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/email/register
pub async fn register_email(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let email = input.email.trim().to_lowercase();
    validate_email(&email).map_err(CoreError::Validation)?;
    validate_username(&input.username).map_err(CoreError::Validation)?;
    validate_password_strength(&input.password).map_err(CoreError::Validation)?;

    if UserRepo::find_by_email(&state.pool, &email).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "User with this email already exists".into(),
        )));
    }
    if UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Username is already taken".into(),
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let identity = ExternalIdentity::Email(email.clone());
    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: input.username,
            email: Some(email),
            password_hash: Some(password_hash),
            avatar: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            auth_type: identity.auth_type(),
            auth_id: identity.auth_id(),
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "User registered with email");
    Ok((StatusCode::CREATED, Json(auth_response(&state, &user)?)))
}

/// POST /api/v1/auth/email/login
pub async fn login_email(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let invalid = || AppError::Core(CoreError::Unauthorized("Invalid email or password".into()));

    let email = input.email.trim().to_lowercase();
    let user = UserRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(invalid)?;

    let Some(hash) = user.password_hash.as_deref() else {
        return Err(invalid());
    };
    let password_valid = verify_password(&input.password, hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(invalid());
    }

    ensure_active(&user)?;
    Ok(Json(auth_response(&state, &user)?))
}

/// POST /api/v1/auth/yandex
///
/// Exchange an OAuth code, then log in the bound user or create one.
pub async fn login_yandex(
    State(state): State<AppState>,
    Json(input): Json<YandexLoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let profile = fetch_profile(&state.http, &state.config.yandex, &input.code).await?;
    let identity = ExternalIdentity::Yandex(profile.id.clone());

    if let Some(user) =
        UserRepo::find_by_external_auth(&state.pool, &identity.auth_id(), AuthType::Yandex).await?
    {
        ensure_active(&user)?;
        return Ok(Json(auth_response(&state, &user)?));
    }

    let username = if UserRepo::find_by_username(&state.pool, &profile.login)
        .await?
        .is_some()
    {
        format!("yandex_{}", profile.id)
    } else {
        profile.login.clone()
    };

    // An email already owned by another account is left off the new one.
    let mut email = profile.default_email.as_deref().map(str::to_lowercase);
    if let Some(address) = &email {
        if UserRepo::find_by_email(&state.pool, address).await?.is_some() {
            email = None;
        }
    }

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username,
            email,
            password_hash: None,
            avatar: profile.avatar_url(),
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            auth_type: identity.auth_type(),
            auth_id: identity.auth_id(),
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "User registered with Yandex");
    Ok(Json(auth_response(&state, &user)?))
}

/// POST /api/v1/auth/telegram/link
///
/// Bind the Telegram account from a signed login-widget payload to the caller.
pub async fn link_telegram(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<BTreeMap<String, serde_json::Value>>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let fields: BTreeMap<String, String> = payload
        .into_iter()
        .map(|(k, v)| {
            let v = match v {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            (k, v)
        })
        .collect();

    let login = verify_login(&fields, &state.config.telegram_bot_token, state.clock.now())
        .map_err(|e| AppError::Core(CoreError::Unauthorized(e)))?;

    if let Some(holder) = UserRepo::find_by_telegram_id(&state.pool, login.id).await? {
        if holder.id != auth.user_id {
            return Err(AppError::Core(CoreError::Conflict(
                "Telegram account is linked to another user".into(),
            )));
        }
    }

    let user = UserRepo::link_telegram(&state.pool, auth.user_id, login.id)
        .await?
        .ok_or_else(|| CoreError::user_not_found(auth.user_id))?;

    tracing::info!(user_id = user.id, telegram_id = login.id, "Telegram linked");
    Ok(Json(DataResponse {
        data: UserResponse::from(&user),
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn ensure_active(user: &User) -> AppResult<()> {
    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }
    Ok(())
}

fn auth_response(state: &AppState, user: &User) -> AppResult<AuthResponse> {
    let issued = generate_access_token(user.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    tracing::debug!(user_id = user.id, jti = %issued.jti, "Access token issued");

    Ok(AuthResponse {
        access_token: issued.token,
        expires_in: issued.expires_in,
        user: UserResponse::from(user),
    })
}
