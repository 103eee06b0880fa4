use thiserror::Error;

use super::FileError;
use crate::models::ProjectId;

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Project {0} not found")]
    NotFound(ProjectId),

    #[error("Project {0} already exists")]
    DuplicateId(ProjectId),

    #[error(transparent)]
    File(#[from] FileError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CategoryError {
    #[error("Category name cannot be empty")]
    EmptyName,

    #[error("Category \"{0}\" already exists")]
    Duplicate(String),

    #[error("Cannot delete category \"{0}\" because it's being used by one or more projects")]
    InUse(String),

    /// The user declined the deletion prompt
    #[error("Deletion of category \"{0}\" was not confirmed")]
    Declined(String),

    #[error("No category at position {0}")]
    IndexOutOfRange(usize),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Unknown category \"{0}\"")]
    UnknownCategory(String),
}
