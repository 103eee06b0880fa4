use axum::{extract::State, response::Json};

use crate::models::{ContactInquiry, ContactReceipt};
use crate::server::app::AppState;
use crate::server::error::ApiError;
use crate::services::contact_service::submit_inquiry;

pub async fn submit_contact(
    State(state): State<AppState>,
    Json(inquiry): Json<ContactInquiry>,
) -> Result<Json<ContactReceipt>, ApiError> {
    Ok(Json(submit_inquiry(inquiry, state.contact_delay).await?))
}
