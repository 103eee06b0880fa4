use axum::{
    extract::{FromRequestParts, Multipart, Path, Query, State},
    http::{header, request::Parts, StatusCode},
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::errors::DashboardError;
use crate::models::{DashboardStats, Project, ProjectId, ProjectInput, SiteContent};
use crate::server::app::AppState;
use crate::server::error::ApiError;
use crate::services::auth_service::SessionToken;
use crate::services::dashboard::{AdminDashboard, SaveOutcome};
use crate::services::project_editor::{MediaTarget, ProjectEditor, Upload};

/// A request carrying a live admin session as `Authorization: Bearer <token>`.
pub struct AdminSession(pub SessionToken);

#[axum::async_trait]
impl FromRequestParts<AppState> for AdminSession {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .and_then(|value| value.trim().parse::<SessionToken>().ok())
            .ok_or(DashboardError::Unauthenticated)?;

        state.dashboard.lock().await.authorize(&token)?;
        Ok(Self(token))
    }
}

// ============================================================================
// Session
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<Value>, ApiError> {
    let token = state
        .dashboard
        .lock()
        .await
        .sign_in(&payload.username, &payload.password)?;
    Ok(Json(json!({ "token": token })))
}

pub async fn logout(AdminSession(token): AdminSession, State(state): State<AppState>) -> StatusCode {
    state.dashboard.lock().await.sign_out(&token);
    StatusCode::NO_CONTENT
}

pub async fn stats(
    _session: AdminSession,
    State(state): State<AppState>,
) -> Result<Json<DashboardStats>, ApiError> {
    Ok(Json(state.dashboard.lock().await.stats()?))
}

// ============================================================================
// Categories
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CategoryRequest {
    pub name: String,
}

pub async fn list_categories(_session: AdminSession, State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.dashboard.lock().await.categories().to_vec())
}

pub async fn add_category(
    _session: AdminSession,
    State(state): State<AppState>,
    Json(payload): Json<CategoryRequest>,
) -> Result<(StatusCode, Json<Vec<String>>), ApiError> {
    let mut dashboard = state.dashboard.lock().await;
    dashboard.add_category(&payload.name)?;
    Ok((StatusCode::CREATED, Json(dashboard.categories().to_vec())))
}

pub async fn rename_category(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(index): Path<usize>,
    Json(payload): Json<CategoryRequest>,
) -> Result<Json<Vec<String>>, ApiError> {
    let mut dashboard = state.dashboard.lock().await;
    dashboard.rename_category(index, &payload.name)?;
    Ok(Json(dashboard.categories().to_vec()))
}

/// The client asks for confirmation before sending the request.
pub async fn delete_category(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<Vec<String>>, ApiError> {
    let mut dashboard = state.dashboard.lock().await;
    dashboard.delete_category(index, |_| true)?;
    Ok(Json(dashboard.categories().to_vec()))
}

// ============================================================================
// Projects
// ============================================================================

fn persist(dashboard: &mut AdminDashboard, editor: ProjectEditor) -> Result<Project, ApiError> {
    let submission = editor.submit()?;
    let id = match dashboard.save_project(submission)? {
        SaveOutcome::Created(id) | SaveOutcome::Updated(id) => id,
    };
    Ok(dashboard.project(id)?)
}

pub async fn list_projects(
    _session: AdminSession,
    State(state): State<AppState>,
) -> Result<Json<Vec<Project>>, ApiError> {
    Ok(Json(state.dashboard.lock().await.projects()?))
}

pub async fn create_project(
    _session: AdminSession,
    State(state): State<AppState>,
    Json(input): Json<ProjectInput>,
) -> Result<(StatusCode, Json<Project>), ApiError> {
    let mut dashboard = state.dashboard.lock().await;
    let mut editor = dashboard.new_project_editor()?;
    editor.replace_draft(input);
    let project = persist(&mut dashboard, editor)?;
    Ok((StatusCode::CREATED, Json(project)))
}

pub async fn update_project(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<ProjectId>,
    Json(input): Json<ProjectInput>,
) -> Result<Json<Project>, ApiError> {
    let mut dashboard = state.dashboard.lock().await;
    let mut editor = dashboard.edit_project(id)?;
    editor.replace_draft(input);
    Ok(Json(persist(&mut dashboard, editor)?))
}

/// The client asks for confirmation before sending the request.
pub async fn delete_project(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<ProjectId>,
) -> Result<StatusCode, ApiError> {
    state.dashboard.lock().await.delete_project(id, |_| true)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn toggle_featured(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<ProjectId>,
) -> Result<Json<Value>, ApiError> {
    let featured = state.dashboard.lock().await.toggle_featured(id)?;
    Ok(Json(json!({ "id": id, "isFeatured": featured })))
}

#[derive(Debug, Default, Deserialize)]
pub struct ImageTarget {
    /// Position of the progress update to attach photos to.
    pub update: Option<usize>,
}

/// Attach uploaded images to a project's gallery, or to one of its progress
/// updates when `?update=<index>` is given.
pub async fn upload_images(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<ProjectId>,
    Query(target): Query<ImageTarget>,
    mut multipart: Multipart,
) -> Result<Json<Project>, ApiError> {
    let mut uploads = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;
        uploads.push(Upload {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        });
    }

    let mut dashboard = state.dashboard.lock().await;
    let mut editor = dashboard.edit_project(id)?;
    let media_target = match target.update {
        None => MediaTarget::Project,
        Some(index) => match editor.updates().handle_at(index) {
            Some(handle) => MediaTarget::Update(handle),
            None => {
                debug!(id, index, "No progress update at index, ignoring upload");
                return Ok(Json(dashboard.project(id)?));
            }
        },
    };

    if editor.ingest_images(uploads, media_target) == 0 {
        return Ok(Json(dashboard.project(id)?));
    }
    Ok(Json(persist(&mut dashboard, editor)?))
}

// ============================================================================
// Site content draft
// ============================================================================

pub async fn get_site_content_draft(
    _session: AdminSession,
    State(state): State<AppState>,
) -> Result<Json<SiteContent>, ApiError> {
    let dashboard = state.dashboard.lock().await;
    let draft = dashboard
        .site_content()
        .cloned()
        .ok_or(DashboardError::ContentNotLoaded)?;
    Ok(Json(draft))
}

pub async fn put_site_content_draft(
    _session: AdminSession,
    State(state): State<AppState>,
    Json(content): Json<SiteContent>,
) -> Json<SiteContent> {
    state.dashboard.lock().await.replace_site_content(content.clone());
    Json(content)
}

pub async fn reload_site_content(
    _session: AdminSession,
    State(state): State<AppState>,
) -> Result<Json<SiteContent>, ApiError> {
    let mut dashboard = state.dashboard.lock().await;
    Ok(Json(dashboard.reload_site_content()?.clone()))
}

pub async fn publish_site_content(
    _session: AdminSession,
    State(state): State<AppState>,
) -> Result<Json<Value>, ApiError> {
    state.dashboard.lock().await.publish_site_content()?;
    Ok(Json(json!({ "success": true })))
}

pub async fn move_milestone_up(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<Value>, ApiError> {
    let moved = state.dashboard.lock().await.move_milestone_up(index)?;
    Ok(Json(json!({ "moved": moved })))
}

pub async fn move_milestone_down(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<Value>, ApiError> {
    let moved = state.dashboard.lock().await.move_milestone_down(index)?;
    Ok(Json(json!({ "moved": moved })))
}
