//! Project catalog: submission into the active launch and launch-scoped listings.

use scout_core::error::CoreError;
use scout_core::types::DbId;
use scout_core::validation::{
    normalize_creators, validate_images, validate_project_text, validate_website,
};
use scout_db::models::project::{CreateProject, Project, UpdateProject};
use scout_db::repositories::{LaunchRepo, ProjectRepo};
use sqlx::PgPool;

use crate::lifecycle::LaunchLifecycle;
use crate::{VotingError, VotingResult};

#[derive(Clone)]
pub struct ProjectCatalog {
    pool: PgPool,
    lifecycle: LaunchLifecycle,
}

impl ProjectCatalog {
    pub fn new(pool: PgPool, lifecycle: LaunchLifecycle) -> Self {
        Self { pool, lifecycle }
    }

    /// Submit a project owned by `owner_id` into the active launch.
    ///
    /// Input is validated before any launch lookup. Vote counts start at zero.
    pub async fn create(&self, input: CreateProject, owner_id: DbId) -> VotingResult<Project> {
        let input = normalize_create(input)?;
        let launch = self.lifecycle.get_active().await?;

        let project = ProjectRepo::create(&self.pool, launch.id, owner_id, &input).await?;
        tracing::info!(
            project_id = project.id,
            launch_id = launch.id,
            owner_id,
            "Project submitted"
        );
        Ok(project)
    }

    pub async fn get(&self, id: DbId) -> VotingResult<Project> {
        ProjectRepo::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| CoreError::project_not_found(id).into())
    }

    /// Projects of a launch. `ordered_by_rating` sorts by rating descending
    /// with ties in submission order; otherwise submission order only.
    pub async fn list_by_launch(
        &self,
        launch_id: DbId,
        ordered_by_rating: bool,
    ) -> VotingResult<Vec<Project>> {
        if LaunchRepo::find_by_id(&self.pool, launch_id).await?.is_none() {
            return Err(CoreError::launch_not_found(launch_id).into());
        }
        let projects = if ordered_by_rating {
            ProjectRepo::list_by_launch_ranked(&self.pool, launch_id).await?
        } else {
            ProjectRepo::list_by_launch(&self.pool, launch_id).await?
        };
        Ok(projects)
    }

    /// Projects of the active launch, best rated first. Empty when the launch
    /// has no projects; fails with `NoActiveLaunch` when there is no launch.
    pub async fn list_active(&self) -> VotingResult<Vec<Project>> {
        let launch = self.lifecycle.get_active().await?;
        Ok(ProjectRepo::list_by_launch_ranked(&self.pool, launch.id).await?)
    }

    /// Projects owned by a user across all launches, newest first.
    pub async fn list_by_owner(&self, owner_id: DbId) -> VotingResult<Vec<Project>> {
        Ok(ProjectRepo::list_by_user(&self.pool, owner_id).await?)
    }

    /// Edit descriptive fields. Only the owner may edit; launch and vote
    /// counts are never touched.
    pub async fn update(
        &self,
        id: DbId,
        owner_id: DbId,
        input: UpdateProject,
    ) -> VotingResult<Project> {
        let existing = self.get(id).await?;
        ensure_owner(&existing, owner_id)?;

        let input = normalize_update(input, &existing)?;
        ProjectRepo::update(&self.pool, id, &input)
            .await?
            .ok_or_else(|| CoreError::project_not_found(id).into())
    }

    /// Delete a project with its votes and comments. Only the owner may delete.
    pub async fn delete(&self, id: DbId, owner_id: DbId) -> VotingResult<()> {
        let existing = self.get(id).await?;
        ensure_owner(&existing, owner_id)?;

        if !ProjectRepo::delete(&self.pool, id).await? {
            return Err(CoreError::project_not_found(id).into());
        }
        tracing::info!(project_id = id, owner_id, "Project deleted");
        Ok(())
    }

    /// Number of projects in the active launch, zero when none is active.
    pub async fn count_active(&self) -> VotingResult<i64> {
        match self.lifecycle.get_active().await {
            Ok(launch) => Ok(ProjectRepo::count_by_launch(&self.pool, launch.id).await?),
            Err(VotingError::Core(CoreError::NoActiveLaunch)) => Ok(0),
            Err(e) => Err(e),
        }
    }
}

fn ensure_owner(project: &Project, user_id: DbId) -> Result<(), CoreError> {
    if project.user_id != user_id {
        return Err(CoreError::Forbidden(
            "Only the project owner can modify it".to_string(),
        ));
    }
    Ok(())
}

fn normalize_create(mut input: CreateProject) -> Result<CreateProject, CoreError> {
    validate_project_text(&input.name, &input.description, &input.full_description)
        .map_err(CoreError::Validation)?;
    validate_website(&input.website).map_err(CoreError::Validation)?;
    validate_images(&input.images).map_err(CoreError::Validation)?;
    input.creators = normalize_creators(&input.creators).map_err(CoreError::Validation)?;

    input.name = input.name.trim().to_string();
    input.description = input.description.trim().to_string();
    input.full_description = input.full_description.trim().to_string();
    input.website = input.website.trim().to_string();
    input.telegram_contact = input.telegram_contact.trim().to_string();
    Ok(input)
}

/// Validate a partial update against the values it would leave in place.
fn normalize_update(mut input: UpdateProject, existing: &Project) -> Result<UpdateProject, CoreError> {
    validate_project_text(
        input.name.as_deref().unwrap_or(&existing.name),
        input
            .description
            .as_deref()
            .unwrap_or(&existing.description),
        input
            .full_description
            .as_deref()
            .unwrap_or(&existing.full_description),
    )
    .map_err(CoreError::Validation)?;

    if let Some(website) = &input.website {
        validate_website(website).map_err(CoreError::Validation)?;
    }
    if let Some(images) = &input.images {
        validate_images(images).map_err(CoreError::Validation)?;
    }
    if let Some(creators) = &input.creators {
        input.creators = Some(normalize_creators(creators).map_err(CoreError::Validation)?);
    }

    let trim = |v: Option<String>| v.map(|s| s.trim().to_string());
    input.name = trim(input.name);
    input.description = trim(input.description);
    input.full_description = trim(input.full_description);
    input.website = trim(input.website);
    input.telegram_contact = trim(input.telegram_contact);
    Ok(input)
}
