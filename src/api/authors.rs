//! Author account API endpoints
//!
//! Handles HTTP requests for account administration:
//! - POST /api/v1/authors - Create an author account
//!
//! Routes sit behind the session guard plus the admin guard.

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use serde::Serialize;
use tracing::info;

use crate::api::middleware::{ApiError, AppState};
use crate::backend::BackendError;
use crate::models::NewAuthor;

/// Response for account creation
#[derive(Debug, Serialize)]
pub struct CreateAuthorResponse {
    pub message: String,
}

/// Build the authors router
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(create_author))
}

/// POST /api/v1/authors - Create an author account
///
/// The backend owns account validation; a rejection there surfaces as a
/// validation error, anything else as a gateway failure.
async fn create_author(
    State(state): State<AppState>,
    Json(body): Json<NewAuthor>,
) -> Result<impl IntoResponse, ApiError> {
    state.backend.create_author(&body).await.map_err(|e| match e {
        BackendError::UnexpectedStatus { status, .. } if (400..500).contains(&status) => {
            ApiError::validation_error("Incorrect input")
        }
        other => ApiError::bad_gateway(other.to_string()),
    })?;

    info!("account created for {}", body.username);

    Ok((
        StatusCode::CREATED,
        Json(CreateAuthorResponse {
            message: format!("Now {} becomes {}", body.username, body.role),
        }),
    ))
}
