//! Vote ledger: at most one vote per (user, project, launch).
//!
//! Both mutations run as a single transaction: resolve the active launch,
//! lock the project row, check the vote triple, insert or delete, recompute
//! the project rating. The row lock orders concurrent writers on a project,
//! so every recompute counts the votes committed before it. The
//! `uq_votes_user_project_launch` constraint backs up the triple check.

use std::sync::Arc;

use scout_core::clock::Clock;
use scout_core::error::CoreError;
use scout_core::types::DbId;
use scout_db::models::vote::Vote;
use scout_db::repositories::{ProjectRepo, VoteRepo};
use scout_db::unique_violation;
use sqlx::PgPool;

use crate::lifecycle::LaunchLifecycle;
use crate::rating::RatingAggregator;
use crate::{VotingError, VotingResult};

const VOTE_TRIPLE_CONSTRAINT: &str = "uq_votes_user_project_launch";

/// Result of a cast or retract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteChange {
    /// A vote row was inserted or removed and the rating recomputed.
    Applied,
    /// The ledger already was in the requested state.
    Unchanged,
}

#[derive(Clone)]
pub struct VoteLedger {
    pool: PgPool,
    clock: Arc<dyn Clock>,
}

impl VoteLedger {
    pub fn new(pool: PgPool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }

    /// Record `user_id`'s vote for `project_id` in the active launch.
    ///
    /// A repeated cast is a no-op returning [`VoteChange::Unchanged`].
    pub async fn cast(&self, user_id: DbId, project_id: DbId) -> VotingResult<VoteChange> {
        let now = self.clock.now();
        let mut tx = self.pool.begin().await?;

        let launch = LaunchLifecycle::active_in(&mut *tx, now).await?;
        lock_project(&mut tx, project_id).await?;

        if VoteRepo::find_for_triple(&mut *tx, user_id, project_id, launch.id)
            .await?
            .is_some()
        {
            return Ok(VoteChange::Unchanged);
        }

        if let Err(err) = VoteRepo::create(&mut *tx, user_id, project_id, launch.id, now).await {
            return match classify_insert_error(err, user_id, project_id, launch.id) {
                VotingError::Core(CoreError::DuplicateVote { .. }) => {
                    tracing::debug!(
                        user_id,
                        project_id,
                        launch_id = launch.id,
                        "Concurrent duplicate vote collapsed"
                    );
                    Ok(VoteChange::Unchanged)
                }
                other => Err(other),
            };
        }

        let project = RatingAggregator::recompute_in(&mut tx, project_id).await?;
        tx.commit().await?;

        tracing::info!(
            user_id,
            project_id,
            launch_id = launch.id,
            rating = project.rating,
            "Vote cast"
        );
        Ok(VoteChange::Applied)
    }

    /// Remove `user_id`'s vote for `project_id` in the active launch.
    ///
    /// Retracting a vote that does not exist returns [`VoteChange::Unchanged`].
    pub async fn retract(&self, user_id: DbId, project_id: DbId) -> VotingResult<VoteChange> {
        let now = self.clock.now();
        let mut tx = self.pool.begin().await?;

        let launch = LaunchLifecycle::active_in(&mut *tx, now).await?;
        lock_project(&mut tx, project_id).await?;

        let Some(vote) = VoteRepo::find_for_triple(&mut *tx, user_id, project_id, launch.id).await?
        else {
            return Ok(VoteChange::Unchanged);
        };

        if !VoteRepo::delete(&mut *tx, vote.id).await? {
            return Ok(VoteChange::Unchanged);
        }

        let project = RatingAggregator::recompute_in(&mut tx, project_id).await?;
        tx.commit().await?;

        tracing::info!(
            user_id,
            project_id,
            launch_id = launch.id,
            rating = project.rating,
            "Vote retracted"
        );
        Ok(VoteChange::Applied)
    }

    /// Whether `user_id` has voted for `project_id` in the active launch.
    /// `false` when no launch is active.
    pub async fn has_voted(&self, user_id: DbId, project_id: DbId) -> VotingResult<bool> {
        let launch = match LaunchLifecycle::active_in(&self.pool, self.clock.now()).await {
            Ok(launch) => launch,
            Err(VotingError::Core(CoreError::NoActiveLaunch)) => return Ok(false),
            Err(e) => return Err(e),
        };
        Ok(
            VoteRepo::find_for_triple(&self.pool, user_id, project_id, launch.id)
                .await?
                .is_some(),
        )
    }

    /// Every vote of a user across launches, newest first.
    pub async fn votes_for_user(&self, user_id: DbId) -> VotingResult<Vec<Vote>> {
        Ok(VoteRepo::list_by_user(&self.pool, user_id).await?)
    }
}

/// Lock the project row so concurrent votes on it recompute one at a time.
async fn lock_project(conn: &mut sqlx::PgConnection, project_id: DbId) -> VotingResult<()> {
    ProjectRepo::lock_for_update(conn, project_id)
        .await?
        .map(|_| ())
        .ok_or_else(|| CoreError::project_not_found(project_id).into())
}

/// Map a vote insert failure. A triple unique violation becomes
/// [`CoreError::DuplicateVote`]; anything else stays a database error.
fn classify_insert_error(
    err: sqlx::Error,
    user_id: DbId,
    project_id: DbId,
    launch_id: DbId,
) -> VotingError {
    if unique_violation(&err) == Some(VOTE_TRIPLE_CONSTRAINT) {
        CoreError::DuplicateVote {
            user_id,
            project_id,
            launch_id,
        }
        .into()
    } else {
        err.into()
    }
}
