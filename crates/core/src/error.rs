use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// No launch is active and unexpired. Only the launch rotation job can fix this.
    #[error("No active launch")]
    NoActiveLaunch,

    #[error("User {user_id} already voted for project {project_id} in launch {launch_id}")]
    DuplicateVote {
        user_id: DbId,
        project_id: DbId,
        launch_id: DbId,
    },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn project_not_found(id: DbId) -> Self {
        CoreError::NotFound {
            entity: "Project",
            id,
        }
    }

    pub fn launch_not_found(id: DbId) -> Self {
        CoreError::NotFound {
            entity: "Launch",
            id,
        }
    }

    pub fn user_not_found(id: DbId) -> Self {
        CoreError::NotFound { entity: "User", id }
    }
}
