use thiserror::Error;

use super::{CategoryError, EditorError, RepositoryError, StoreError};
use crate::models::ProjectId;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Not signed in")]
    Unauthenticated,

    #[error("Project {0} not found")]
    ProjectNotFound(ProjectId),

    /// The user declined the deletion prompt
    #[error("Deletion of project {0} was not confirmed")]
    Declined(ProjectId),

    /// Site content editing was attempted before any document was loaded
    #[error("Site content is not loaded")]
    ContentNotLoaded,

    #[error(transparent)]
    Category(#[from] CategoryError),

    #[error(transparent)]
    Editor(#[from] EditorError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
