//! Project comment model and DTOs.

use scout_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `comments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Comment {
    pub id: DbId,
    pub user_id: DbId,
    pub project_id: DbId,
    pub content: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Comment joined with its author's public profile, for listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CommentWithAuthor {
    pub id: DbId,
    pub user_id: DbId,
    pub project_id: DbId,
    pub content: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub author_username: String,
    pub author_avatar: String,
}

/// Request body for creating or editing a comment.
#[derive(Debug, Clone, Deserialize)]
pub struct CommentContent {
    pub content: String,
}
