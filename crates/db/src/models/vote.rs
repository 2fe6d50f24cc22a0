//! Vote ledger row.

use scout_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `votes` table. Unique per (user, project, launch).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Vote {
    pub id: DbId,
    pub user_id: DbId,
    pub project_id: DbId,
    pub launch_id: DbId,
    pub created_at: Timestamp,
}
