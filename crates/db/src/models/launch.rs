//! Weekly launch window model.

use scout_core::launch_schedule::LaunchWindow;
use scout_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `launches` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Launch {
    pub id: DbId,
    pub name: String,
    pub start_date: Timestamp,
    /// Inclusive end of the window.
    pub end_date: Timestamp,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Launch {
    /// Whether the window's end has passed at `now`.
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        self.end_date <= now
    }
}

/// DTO for inserting a launch.
#[derive(Debug, Clone)]
pub struct CreateLaunch {
    pub name: String,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub is_active: bool,
}

impl From<LaunchWindow> for CreateLaunch {
    fn from(window: LaunchWindow) -> Self {
        Self {
            name: window.name,
            start_date: window.start_date,
            end_date: window.end_date,
            is_active: true,
        }
    }
}
