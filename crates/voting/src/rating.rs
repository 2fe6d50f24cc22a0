//! Denormalized project rating.

use scout_core::error::CoreError;
use scout_core::types::DbId;
use scout_db::models::project::Project;
use scout_db::repositories::{ProjectRepo, VoteRepo};
use sqlx::{PgConnection, PgPool};

use crate::VotingResult;

/// Rewrites `upvotes` and `rating` from the vote rows of a project.
#[derive(Clone)]
pub struct RatingAggregator {
    pool: PgPool,
}

impl RatingAggregator {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Recompute in a transaction of its own, holding the project row lock
    /// vote writers take.
    pub async fn recompute(&self, project_id: DbId) -> VotingResult<Project> {
        let mut tx = self.pool.begin().await?;
        ProjectRepo::lock_for_update(&mut *tx, project_id)
            .await?
            .ok_or_else(|| CoreError::project_not_found(project_id))?;
        let project = Self::recompute_in(&mut tx, project_id).await?;
        tx.commit().await?;
        Ok(project)
    }

    /// Recompute on `conn`, typically the connection of an open vote
    /// transaction that already holds the project row lock.
    ///
    /// Counts every vote row of the project regardless of launch.
    pub async fn recompute_in(conn: &mut PgConnection, project_id: DbId) -> VotingResult<Project> {
        let count = VoteRepo::count_for_project(&mut *conn, project_id).await?;
        let count = i32::try_from(count)
            .map_err(|_| CoreError::Internal(format!("Vote count {count} overflows i32")))?;

        let project = ProjectRepo::set_vote_count(&mut *conn, project_id, count)
            .await?
            .ok_or_else(|| CoreError::project_not_found(project_id))?;

        tracing::debug!(project_id, rating = project.rating, "Rating recomputed");
        Ok(project)
    }
}
