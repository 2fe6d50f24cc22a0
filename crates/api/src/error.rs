//! HTTP error type. Every failure leaves a handler as `{ "error", "code" }`
//! JSON with a status chosen from the error variant.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use scout_core::error::CoreError;
use scout_db::UNIQUE_VIOLATION;
use scout_voting::VotingError;
use serde_json::json;

use crate::auth::yandex::YandexError;

const INTERNAL_MESSAGE: &str = "An internal error occurred";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Malformed input that never reached the domain layer.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The OAuth provider could not be reached or answered garbage.
    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<VotingError> for AppError {
    fn from(err: VotingError) -> Self {
        match err {
            VotingError::Core(core) => AppError::Core(core),
            VotingError::Database(db) => AppError::Database(db),
        }
    }
}

impl From<YandexError> for AppError {
    fn from(err: YandexError) -> Self {
        match err {
            YandexError::NotConfigured => AppError::BadRequest(err.to_string()),
            YandexError::Rejected(reason) => {
                AppError::Core(CoreError::Unauthorized(format!("Yandex login failed: {reason}")))
            }
            YandexError::Http(e) => AppError::Upstream(e.to_string()),
        }
    }
}

type ErrorParts = (StatusCode, &'static str, String);

fn internal() -> ErrorParts {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        INTERNAL_MESSAGE.to_string(),
    )
}

fn core_parts(err: &CoreError) -> ErrorParts {
    match err {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        // Voting is closed until the rotation job opens the next launch.
        CoreError::NoActiveLaunch => (
            StatusCode::CONFLICT,
            "NO_ACTIVE_LAUNCH",
            "No launch is currently active".to_string(),
        ),
        CoreError::DuplicateVote { .. } => (
            StatusCode::CONFLICT,
            "DUPLICATE_VOTE",
            "Vote already recorded for this launch".to_string(),
        ),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
        CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
        CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal domain error");
            internal()
        }
    }
}

/// `RowNotFound` is a 404 and a unique violation on a `uq_*` constraint is a
/// 409. Anything else is logged and hidden behind a 500.
fn database_parts(err: &sqlx::Error) -> ErrorParts {
    if matches!(err, sqlx::Error::RowNotFound) {
        return (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        );
    }

    if let sqlx::Error::Database(db_err) = err {
        let constraint = db_err.constraint().unwrap_or_default();
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) && constraint.starts_with("uq_") {
            return (
                StatusCode::CONFLICT,
                "CONFLICT",
                format!("Duplicate value violates unique constraint: {constraint}"),
            );
        }
    }

    tracing::error!(error = %err, "Database error");
    internal()
}

impl AppError {
    fn parts(&self) -> ErrorParts {
        match self {
            AppError::Core(core) => core_parts(core),
            AppError::Database(err) => database_parts(err),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::Upstream(msg) => {
                tracing::warn!(error = %msg, "Identity provider request failed");
                (
                    StatusCode::BAD_GATEWAY,
                    "UPSTREAM_ERROR",
                    "Identity provider is unavailable".to_string(),
                )
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();
        (status, Json(json!({ "error": message, "code": code }))).into_response()
    }
}
