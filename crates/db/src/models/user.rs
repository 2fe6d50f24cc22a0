//! User entity model and DTOs.

use scout_core::identity::AuthType;
use scout_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub avatar: String,
    pub first_name: String,
    pub last_name: String,
    pub auth_type: String,
    pub auth_id: String,
    pub telegram_id: Option<i64>,
    pub is_active: bool,
    pub email_verified: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub username: String,
    pub email: Option<String>,
    pub avatar: String,
    pub first_name: String,
    pub last_name: String,
    pub auth_type: String,
    pub telegram_id: Option<i64>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            avatar: user.avatar.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            auth_type: user.auth_type.clone(),
            telegram_id: user.telegram_id,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// DTO for creating a new user.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub avatar: String,
    pub first_name: String,
    pub last_name: String,
    pub auth_type: AuthType,
    pub auth_id: String,
}

/// DTO for updating a user's profile. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUser {
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub avatar: Option<String>,
}
