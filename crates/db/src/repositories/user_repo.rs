//! Repository for the `users` table.

use scout_core::identity::AuthType;
use scout_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, UpdateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, email, password_hash, avatar, first_name, last_name, \
                       auth_type, auth_id, telegram_id, is_active, email_verified, \
                       created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users
                (username, email, password_hash, avatar, first_name, last_name, auth_type, auth_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.avatar)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(input.auth_type.as_str())
            .bind(&input.auth_id)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by username (case-sensitive).
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email (case-sensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by their primary login identity.
    pub async fn find_by_external_auth(
        pool: &PgPool,
        auth_id: &str,
        auth_type: AuthType,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE auth_id = $1 AND auth_type = $2");
        sqlx::query_as::<_, User>(&query)
            .bind(auth_id)
            .bind(auth_type.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Find the user a Telegram account is linked to.
    pub async fn find_by_telegram_id(
        pool: &PgPool,
        telegram_id: i64,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE telegram_id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(telegram_id)
            .fetch_optional(pool)
            .await
    }

    /// Update profile fields. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                username = COALESCE($2, username),
                first_name = COALESCE($3, first_name),
                last_name = COALESCE($4, last_name),
                avatar = COALESCE($5, avatar)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.username)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.avatar)
            .fetch_optional(pool)
            .await
    }

    /// Bind a Telegram account to a user. Fails with a unique violation on
    /// `uq_users_telegram_id` if another user already holds it.
    pub async fn link_telegram(
        pool: &PgPool,
        id: DbId,
        telegram_id: i64,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("UPDATE users SET telegram_id = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(telegram_id)
            .fetch_optional(pool)
            .await
    }

    /// Set `is_active = false`. Returns `true` if the row was active before.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE users SET is_active = false WHERE id = $1 AND is_active = true")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count users that are not deactivated.
    pub async fn count_active(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE is_active = true")
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }
}
