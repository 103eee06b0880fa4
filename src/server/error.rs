use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::errors::{
    CategoryError, ContactError, DashboardError, EditorError, FileError, RepositoryError,
    StoreError,
};

/// Anything a handler can fail with, rendered as `{ "error": "..." }`.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Dashboard(#[from] DashboardError),

    #[error(transparent)]
    Contact(#[from] ContactError),

    #[error(transparent)]
    File(#[from] FileError),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),
}

impl From<CategoryError> for ApiError {
    fn from(err: CategoryError) -> Self {
        Self::Dashboard(err.into())
    }
}

impl From<EditorError> for ApiError {
    fn from(err: EditorError) -> Self {
        Self::Dashboard(err.into())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Dashboard(err) => dashboard_status(err),
            ApiError::Contact(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::File(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

fn dashboard_status(err: &DashboardError) -> StatusCode {
    match err {
        DashboardError::InvalidCredentials | DashboardError::Unauthenticated => {
            StatusCode::UNAUTHORIZED
        }
        DashboardError::ProjectNotFound(_)
        | DashboardError::Repository(RepositoryError::NotFound(_))
        | DashboardError::Category(CategoryError::IndexOutOfRange(_)) => StatusCode::NOT_FOUND,
        DashboardError::Declined(_)
        | DashboardError::ContentNotLoaded
        | DashboardError::Repository(RepositoryError::DuplicateId(_))
        | DashboardError::Category(CategoryError::Duplicate(_))
        | DashboardError::Category(CategoryError::InUse(_))
        | DashboardError::Category(CategoryError::Declined(_)) => StatusCode::CONFLICT,
        DashboardError::Category(CategoryError::EmptyName)
        | DashboardError::Editor(_)
        | DashboardError::Store(StoreError::MissingBody) => StatusCode::BAD_REQUEST,
        DashboardError::Repository(RepositoryError::File(_)) | DashboardError::Store(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
