use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::{json, Value};
use tracing::error;

use crate::errors::StoreError;
use crate::server::app::AppState;

const READ_FAILED: &str = "Unable to read content";
const SAVE_FAILED: &str = "Unable to save content";
const INVALID_PAYLOAD: &str = "Invalid payload";

fn failure(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

pub async fn get_site_content(State(state): State<AppState>) -> Response {
    match state.store.read() {
        Ok(document) => Json(document).into_response(),
        Err(e) => {
            error!("Failed to read site content: {}", e);
            failure(StatusCode::INTERNAL_SERVER_ERROR, READ_FAILED)
        }
    }
}

/// Replace the stored document with the request body, whatever its shape.
pub async fn post_site_content(State(state): State<AppState>, body: Bytes) -> Response {
    if body.iter().all(u8::is_ascii_whitespace) {
        return failure(StatusCode::BAD_REQUEST, INVALID_PAYLOAD);
    }

    let document: Value = match serde_json::from_slice(&body) {
        Ok(document) => document,
        Err(e) => {
            error!("Failed to parse site content body: {}", e);
            return failure(StatusCode::INTERNAL_SERVER_ERROR, SAVE_FAILED);
        }
    };

    match state.store.replace(Some(document)) {
        Ok(()) => Json(json!({ "success": true })).into_response(),
        Err(StoreError::MissingBody) => failure(StatusCode::BAD_REQUEST, INVALID_PAYLOAD),
        Err(e) => {
            error!("Failed to save site content: {}", e);
            failure(StatusCode::INTERNAL_SERVER_ERROR, SAVE_FAILED)
        }
    }
}
