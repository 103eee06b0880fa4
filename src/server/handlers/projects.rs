use axum::{
    extract::{Path, Query, State},
    response::Json,
};

use crate::models::{Project, ProjectId, ProjectListItem};
use crate::server::app::AppState;
use crate::server::error::ApiError;
use crate::services::catalog_service::{self, ProjectQuery};

pub async fn list_projects(
    State(state): State<AppState>,
    Query(query): Query<ProjectQuery>,
) -> Result<Json<Vec<ProjectListItem>>, ApiError> {
    let projects = state.dashboard.lock().await.projects()?;
    let items = catalog_service::filter_projects(&projects, &query)
        .into_iter()
        .map(ProjectListItem::from)
        .collect();
    Ok(Json(items))
}

pub async fn featured_projects(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProjectListItem>>, ApiError> {
    let projects = state.dashboard.lock().await.projects()?;
    let items = catalog_service::featured_projects(&projects)
        .into_iter()
        .map(ProjectListItem::from)
        .collect();
    Ok(Json(items))
}

pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<ProjectId>,
) -> Result<Json<Project>, ApiError> {
    Ok(Json(state.dashboard.lock().await.project(id)?))
}
