//! Review API endpoints
//!
//! Handles HTTP requests for the draft review queue:
//! - GET /api/v1/review/next - Head of the draft queue
//! - POST /api/v1/review/{id}/approve - Publish a draft
//! - POST /api/v1/review/{id}/revoke - Return a question to draft
//!
//! All routes sit behind the session guard plus the reviewer guard
//! (editor or admin).

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

use crate::api::middleware::{ApiError, AppState};
use crate::models::Question;

/// Build the review router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/next", get(next_draft))
        .route("/{id}/approve", post(approve))
        .route("/{id}/revoke", post(revoke))
}

/// GET /api/v1/review/next - Head of the draft queue
///
/// The queue is re-read from the backend on every call, so the head
/// reflects whatever other reviewers have done since. An empty queue
/// answers 204.
async fn next_draft(State(state): State<AppState>) -> Result<Response, ApiError> {
    match state.workflow.next_draft().await? {
        Some(question) => Ok(Json(question).into_response()),
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}

/// POST /api/v1/review/{id}/approve - Publish a draft
///
/// Approving an already published question is a no-op success.
async fn approve(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Question>, ApiError> {
    let question = state.workflow.approve(id).await?;
    Ok(Json(question))
}

/// POST /api/v1/review/{id}/revoke - Return a question to draft
///
/// Revoking a question that is already a draft is a no-op success.
async fn revoke(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Question>, ApiError> {
    let question = state.workflow.revoke(id).await?;
    Ok(Json(question))
}
