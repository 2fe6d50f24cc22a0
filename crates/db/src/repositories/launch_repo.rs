//! Repository for the `launches` table.

use scout_core::types::{DbId, Timestamp};
use sqlx::{PgExecutor, PgPool};

use crate::models::launch::{CreateLaunch, Launch};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, start_date, end_date, is_active, created_at, updated_at";

/// Advisory lock key serializing launch rotation across processes.
const ROTATION_LOCK_KEY: i64 = 0x5C0_0700;

/// Provides CRUD operations for launches.
pub struct LaunchRepo;

impl LaunchRepo {
    /// Insert a new launch, returning the created row.
    pub async fn create<'e, E>(executor: E, input: &CreateLaunch) -> Result<Launch, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO launches (name, start_date, end_date, is_active)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Launch>(&query)
            .bind(&input.name)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.is_active)
            .fetch_one(executor)
            .await
    }

    /// Find a launch by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Launch>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM launches WHERE id = $1");
        sqlx::query_as::<_, Launch>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The launch flagged active whose end is strictly after `now`.
    pub async fn find_active<'e, E>(executor: E, now: Timestamp) -> Result<Option<Launch>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "SELECT {COLUMNS} FROM launches
             WHERE is_active = true AND end_date > $1
             ORDER BY start_date DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, Launch>(&query)
            .bind(now)
            .fetch_optional(executor)
            .await
    }

    /// The launch flagged active, whether or not its window has passed.
    pub async fn find_flagged_active<'e, E>(executor: E) -> Result<Option<Launch>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "SELECT {COLUMNS} FROM launches
             WHERE is_active = true
             ORDER BY start_date DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, Launch>(&query)
            .fetch_optional(executor)
            .await
    }

    /// Clear the active flag. Returns `true` if the row was active before.
    pub async fn deactivate<'e, E>(executor: E, id: DbId) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result =
            sqlx::query("UPDATE launches SET is_active = false WHERE id = $1 AND is_active = true")
                .bind(id)
                .execute(executor)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Start dates of every stored launch, used to number new launches.
    pub async fn list_start_dates<'e, E>(executor: E) -> Result<Vec<Timestamp>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let rows: Vec<(Timestamp,)> = sqlx::query_as("SELECT start_date FROM launches")
            .fetch_all(executor)
            .await?;
        Ok(rows.into_iter().map(|(start,)| start).collect())
    }

    /// List all launches, most recent window first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Launch>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM launches ORDER BY start_date DESC, id DESC");
        sqlx::query_as::<_, Launch>(&query).fetch_all(pool).await
    }

    /// Take the transaction-scoped rotation lock. Released on commit/rollback.
    pub async fn lock_rotation<'e, E>(executor: E) -> Result<(), sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(ROTATION_LOCK_KEY)
            .execute(executor)
            .await?;
        Ok(())
    }
}
