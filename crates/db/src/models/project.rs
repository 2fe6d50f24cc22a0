//! Project entity model and DTOs.

use scout_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub full_description: String,
    pub logo: Option<String>,
    pub images: Vec<String>,
    pub creators: Vec<String>,
    pub telegram_contact: String,
    pub website: String,
    /// Live vote count, maintained by the rating aggregator.
    pub upvotes: i32,
    /// Equals `upvotes`.
    pub rating: i32,
    pub launch_id: DbId,
    pub user_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project. Launch and owner are stamped by the catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub name: String,
    pub description: String,
    pub full_description: String,
    pub logo: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub creators: Vec<String>,
    #[serde(default)]
    pub telegram_contact: String,
    #[serde(default)]
    pub website: String,
}

/// DTO for updating a project's descriptive fields. Vote counts and the
/// launch are not editable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProject {
    pub name: Option<String>,
    pub description: Option<String>,
    pub full_description: Option<String>,
    pub logo: Option<String>,
    pub images: Option<Vec<String>>,
    pub creators: Option<Vec<String>>,
    pub telegram_contact: Option<String>,
    pub website: Option<String>,
}
