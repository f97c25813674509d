use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;
use stagecraft_shared::models::contact::ContactSubmission;
use stagecraft_shared::models::events::{ContactReceivedEvent, DomainEvent};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/contact", post(submit_contact))
        .route("/v1/admin/contact", get(list_submissions))
        .route("/v1/admin/contact/{id}/read", post(mark_read))
}

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ListSubmissionsQuery {
    #[serde(default)]
    pub unread_only: bool,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /v1/contact
/// Accept a contact submission from the public site
async fn submit_contact(
    State(state): State<AppState>,
    Json(req): Json<ContactRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    if req.name.trim().is_empty() || req.email.trim().is_empty() || req.message.trim().is_empty() {
        return Err(AppError::ValidationError(
            "name, email, and message are required".to_string(),
        ));
    }

    let submission = ContactSubmission::new(req.name, req.email, req.phone, req.message);
    state.contact_repo.create_submission(&submission).await?;

    state
        .events
        .publish(DomainEvent::ContactReceived(ContactReceivedEvent {
            submission_id: submission.id,
            timestamp: Utc::now().timestamp(),
        }));

    // Email stays masked in logs
    tracing::info!(
        "Contact submission {} received from {}",
        submission.id,
        submission.email
    );

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "id": submission.id })),
    ))
}

/// GET /v1/admin/contact
/// List contact submissions, newest first
async fn list_submissions(
    State(state): State<AppState>,
    Query(query): Query<ListSubmissionsQuery>,
) -> Result<Json<Vec<ContactSubmission>>, AppError> {
    let submissions = state.contact_repo.list_submissions(query.unread_only).await?;
    Ok(Json(submissions))
}

/// POST /v1/admin/contact/{id}/read
/// Mark a submission as read
async fn mark_read(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.contact_repo.mark_read(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
