//! Authentication API endpoints
//!
//! Handles HTTP requests for author sign-in:
//! - POST /api/v1/auth/login - Verify credentials and mint a session cookie
//! - POST /api/v1/auth/logout - Clear the session cookie
//! - GET /api/v1/auth/me - Current author resolved by the session guard

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::api::middleware::{
    clear_session_cookie, session_cookie, ApiError, AppState, CurrentAuthor,
};
use crate::models::{Author, Session};

/// Request body for sign-in
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response for successful sign-in
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub author: AuthorSummary,
}

/// Author identity carried in the sign-in response
#[derive(Debug, Serialize)]
pub struct AuthorSummary {
    pub id: i64,
    pub username: String,
}

/// Response for the current author
#[derive(Debug, Serialize)]
pub struct AuthorResponse {
    pub id: i64,
    pub username: String,
    pub role: String,
}

impl From<Author> for AuthorResponse {
    fn from(author: Author) -> Self {
        Self {
            id: author.id,
            username: author.username,
            role: author.role.to_string(),
        }
    }
}

/// Build public auth routes (no session required)
pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
}

/// Build session-guarded auth routes
pub fn protected_router() -> Router<AppState> {
    Router::new().route("/me", get(get_current_author))
}

/// POST /api/v1/auth/login - Verify credentials and mint a session
///
/// The backend owns the password check; this handler only turns a
/// verified identity into a cookie claim.
async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if body.username.trim().is_empty() || body.password.is_empty() {
        return Err(ApiError::validation_error(
            "Incorrect username or password.",
        ));
    }

    let verified = state
        .backend
        .verify_creds(&body.username, &body.password)
        .await
        .map_err(|e| {
            warn!("credential verification failed: {}", e);
            ApiError::bad_gateway("Login failed. Please try again.")
        })?
        .ok_or_else(|| ApiError::validation_error("Incorrect username or password."))?;

    let session = Session::new(
        verified.id,
        verified.username.clone(),
        state.session_ttl_minutes,
    );
    let cookie = session_cookie(&session, state.session_ttl_minutes)?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::SET_COOKIE,
        HeaderValue::from_str(&cookie)
            .map_err(|e| ApiError::internal_error(format!("Failed to set cookie: {}", e)))?,
    );

    info!("author {} signed in", verified.username);

    Ok((
        headers,
        Json(LoginResponse {
            message: "Welcome to the dashboard!".to_string(),
            author: AuthorSummary {
                id: verified.id,
                username: verified.username,
            },
        }),
    ))
}

/// POST /api/v1/auth/logout - Clear the session cookie
///
/// The cookie is the only session state, so clearing it ends the session.
/// No backend call and no authentication required.
async fn logout() -> Result<impl IntoResponse, ApiError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::SET_COOKIE,
        HeaderValue::from_str(&clear_session_cookie())
            .map_err(|e| ApiError::internal_error(format!("Failed to set cookie: {}", e)))?,
    );

    Ok((StatusCode::NO_CONTENT, headers))
}

/// GET /api/v1/auth/me - Current author
///
/// Requires a revalidated session.
async fn get_current_author(CurrentAuthor(author): CurrentAuthor) -> Json<AuthorResponse> {
    Json(author.into())
}
