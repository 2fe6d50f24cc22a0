//! Repository for the `votes` table.

use scout_core::types::{DbId, Timestamp};
use sqlx::{PgExecutor, PgPool};

use crate::models::vote::Vote;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, project_id, launch_id, created_at";

/// Vote rows are only ever inserted or deleted, never updated.
pub struct VoteRepo;

impl VoteRepo {
    /// Insert a vote for the (user, project, launch) triple.
    ///
    /// Fails with a unique violation on `uq_votes_user_project_launch` if the
    /// triple already exists.
    pub async fn create<'e, E>(
        executor: E,
        user_id: DbId,
        project_id: DbId,
        launch_id: DbId,
        created_at: Timestamp,
    ) -> Result<Vote, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO votes (user_id, project_id, launch_id, created_at)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Vote>(&query)
            .bind(user_id)
            .bind(project_id)
            .bind(launch_id)
            .bind(created_at)
            .fetch_one(executor)
            .await
    }

    /// Find the vote for a (user, project, launch) triple.
    pub async fn find_for_triple<'e, E>(
        executor: E,
        user_id: DbId,
        project_id: DbId,
        launch_id: DbId,
    ) -> Result<Option<Vote>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "SELECT {COLUMNS} FROM votes
             WHERE user_id = $1 AND project_id = $2 AND launch_id = $3"
        );
        sqlx::query_as::<_, Vote>(&query)
            .bind(user_id)
            .bind(project_id)
            .bind(launch_id)
            .fetch_optional(executor)
            .await
    }

    /// Delete a vote by ID. Returns `true` if a row was removed.
    pub async fn delete<'e, E>(executor: E, id: DbId) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM votes WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Number of live vote rows for a project.
    pub async fn count_for_project<'e, E>(executor: E, project_id: DbId) -> Result<i64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM votes WHERE project_id = $1")
            .bind(project_id)
            .fetch_one(executor)
            .await?;
        Ok(row.0)
    }

    /// All votes cast by a user, newest first.
    pub async fn list_by_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Vote>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM votes WHERE user_id = $1 ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Vote>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
