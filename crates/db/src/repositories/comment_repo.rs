//! Repository for the `comments` table.

use scout_core::types::DbId;
use sqlx::PgPool;

use crate::models::comment::{Comment, CommentWithAuthor};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, project_id, content, created_at, updated_at";

/// Provides CRUD operations for comments.
pub struct CommentRepo;

impl CommentRepo {
    /// Insert a new comment, returning the created row.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        project_id: DbId,
        content: &str,
    ) -> Result<Comment, sqlx::Error> {
        let query = format!(
            "INSERT INTO comments (user_id, project_id, content)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(user_id)
            .bind(project_id)
            .bind(content)
            .fetch_one(pool)
            .await
    }

    /// Find a comment by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM comments WHERE id = $1");
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Comments on a project with author info, oldest first.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<CommentWithAuthor>, sqlx::Error> {
        sqlx::query_as::<_, CommentWithAuthor>(
            "SELECT c.id, c.user_id, c.project_id, c.content, c.created_at, c.updated_at,
                    u.username AS author_username, u.avatar AS author_avatar
             FROM comments c
             JOIN users u ON u.id = c.user_id
             WHERE c.project_id = $1
             ORDER BY c.created_at ASC, c.id ASC",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await
    }

    /// Replace a comment's content. Returns `None` if the comment does not exist.
    pub async fn update_content(
        pool: &PgPool,
        id: DbId,
        content: &str,
    ) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!("UPDATE comments SET content = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .bind(content)
            .fetch_optional(pool)
            .await
    }

    /// Delete a comment. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
