//! Repository for the `projects` table.

use scout_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::project::{CreateProject, Project, UpdateProject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, full_description, logo, images, creators, \
                       telegram_contact, website, upvotes, rating, launch_id, user_id, \
                       created_at, updated_at";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project into `launch_id` owned by `user_id`, with zeroed
    /// vote counts. Returns the created row.
    pub async fn create<'e, E>(
        executor: E,
        launch_id: DbId,
        user_id: DbId,
        input: &CreateProject,
    ) -> Result<Project, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO projects
                (name, description, full_description, logo, images, creators,
                 telegram_contact, website, upvotes, rating, launch_id, user_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 0, 0, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.full_description)
            .bind(&input.logo)
            .bind(&input.images)
            .bind(&input.creators)
            .bind(&input.telegram_contact)
            .bind(&input.website)
            .bind(launch_id)
            .bind(user_id)
            .fetch_one(executor)
            .await
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id<'e, E>(executor: E, id: DbId) -> Result<Option<Project>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Row-lock a project for the rest of the caller's transaction.
    ///
    /// Vote writers take this before counting votes, so each count sees the
    /// votes of every writer that locked the row earlier.
    pub async fn lock_for_update<'e, E>(executor: E, id: DbId) -> Result<Option<DbId>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_scalar("SELECT id FROM projects WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Projects of a launch in insertion order.
    pub async fn list_by_launch(pool: &PgPool, launch_id: DbId) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE launch_id = $1 ORDER BY id");
        sqlx::query_as::<_, Project>(&query)
            .bind(launch_id)
            .fetch_all(pool)
            .await
    }

    /// Projects of a launch by rating, highest first. Ties keep insertion order.
    pub async fn list_by_launch_ranked(
        pool: &PgPool,
        launch_id: DbId,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects WHERE launch_id = $1 ORDER BY rating DESC, id ASC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(launch_id)
            .fetch_all(pool)
            .await
    }

    /// Projects owned by a user, newest first.
    pub async fn list_by_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects WHERE user_id = $1 ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Count the projects submitted to a launch.
    pub async fn count_by_launch(pool: &PgPool, launch_id: DbId) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM projects WHERE launch_id = $1")
            .bind(launch_id)
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    /// Update descriptive fields. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                full_description = COALESCE($4, full_description),
                logo = COALESCE($5, logo),
                images = COALESCE($6, images),
                creators = COALESCE($7, creators),
                telegram_contact = COALESCE($8, telegram_contact),
                website = COALESCE($9, website)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.full_description)
            .bind(&input.logo)
            .bind(&input.images)
            .bind(&input.creators)
            .bind(&input.telegram_contact)
            .bind(&input.website)
            .fetch_optional(pool)
            .await
    }

    /// Write the denormalized vote count into both `upvotes` and `rating`.
    ///
    /// Returns `None` if the project does not exist.
    pub async fn set_vote_count<'e, E>(
        executor: E,
        id: DbId,
        count: i32,
    ) -> Result<Option<Project>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "UPDATE projects SET upvotes = $2, rating = $2
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(count)
            .fetch_optional(executor)
            .await
    }

    /// Permanently delete a project (votes and comments cascade).
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
