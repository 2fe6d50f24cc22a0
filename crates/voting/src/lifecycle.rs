//! Launch lifecycle: resolving and rotating the weekly launch window.

use std::sync::Arc;

use chrono::FixedOffset;
use scout_core::clock::Clock;
use scout_core::error::CoreError;
use scout_core::launch_schedule::LaunchWindow;
use scout_core::types::{DbId, Timestamp};
use scout_db::models::launch::{CreateLaunch, Launch};
use scout_db::repositories::LaunchRepo;
use sqlx::{PgExecutor, PgPool};

use crate::VotingResult;

/// Resolves the active launch and creates the next one when it expires.
#[derive(Clone)]
pub struct LaunchLifecycle {
    pool: PgPool,
    clock: Arc<dyn Clock>,
    offset: FixedOffset,
}

impl LaunchLifecycle {
    /// `offset` is the launch time zone; weeks start at Monday 00:00 in it.
    pub fn new(pool: PgPool, clock: Arc<dyn Clock>, offset: FixedOffset) -> Self {
        Self {
            pool,
            clock,
            offset,
        }
    }

    fn now(&self) -> Timestamp {
        self.clock.now()
    }

    /// The launch that is flagged active and has not ended yet.
    pub async fn get_active(&self) -> VotingResult<Launch> {
        Self::active_in(&self.pool, self.now()).await
    }

    /// [`get_active`](Self::get_active) on a caller-supplied executor, so the
    /// lookup can share a transaction with the writes that depend on it.
    pub async fn active_in<'e, E>(executor: E, now: Timestamp) -> VotingResult<Launch>
    where
        E: PgExecutor<'e>,
    {
        LaunchRepo::find_active(executor, now)
            .await?
            .ok_or_else(|| CoreError::NoActiveLaunch.into())
    }

    /// Return the current launch, rotating to a new one if the flagged launch
    /// has ended or none exists. Safe to call repeatedly and concurrently.
    pub async fn ensure_active_launch(&self) -> VotingResult<Launch> {
        let now = self.now();
        let mut tx = self.pool.begin().await?;
        LaunchRepo::lock_rotation(&mut *tx).await?;

        if let Some(current) = LaunchRepo::find_flagged_active(&mut *tx).await? {
            if !current.is_expired_at(now) {
                tx.commit().await?;
                return Ok(current);
            }
            LaunchRepo::deactivate(&mut *tx, current.id).await?;
            tracing::info!(
                launch_id = current.id,
                name = %current.name,
                end_date = %current.end_date,
                "Launch expired, deactivated"
            );
        }

        let existing = LaunchRepo::list_start_dates(&mut *tx).await?;
        let window = LaunchWindow::plan(now, self.offset, existing);
        let launch = LaunchRepo::create(&mut *tx, &CreateLaunch::from(window)).await?;
        tx.commit().await?;

        tracing::info!(
            launch_id = launch.id,
            name = %launch.name,
            start_date = %launch.start_date,
            end_date = %launch.end_date,
            "Launch created"
        );
        Ok(launch)
    }

    pub async fn get_by_id(&self, id: DbId) -> VotingResult<Launch> {
        LaunchRepo::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| CoreError::launch_not_found(id).into())
    }

    /// Every launch, most recent first.
    pub async fn list(&self) -> VotingResult<Vec<Launch>> {
        Ok(LaunchRepo::list(&self.pool).await?)
    }
}
