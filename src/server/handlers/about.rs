use axum::{extract::State, response::Json};

use crate::models::AboutPage;
use crate::server::app::AppState;
use crate::server::error::ApiError;
use crate::services::catalog_service::load_about;

pub async fn get_about(State(state): State<AppState>) -> Result<Json<AboutPage>, ApiError> {
    Ok(Json(load_about(&state.data_dir)?))
}
