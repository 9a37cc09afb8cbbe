//! API middleware and shared types
//!
//! This module contains:
//! - `AppState` shared by all handlers
//! - `ApiError` JSON error envelope
//! - Session cookie encoding/decoding
//! - Session, reviewer and admin guard middleware

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::backend::QuizBackend;
use crate::models::{Author, Session};
use crate::services::{
    GuardError, GuardService, ImporterError, ImporterService, WorkflowError, WorkflowService,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn QuizBackend>,
    pub guard: Arc<GuardService>,
    pub workflow: Arc<WorkflowService>,
    pub importer: Arc<ImporterService>,
    pub session_ttl_minutes: u64,
}

impl AppState {
    /// Build the state from a backend handle and the session TTL
    pub fn new(backend: Arc<dyn QuizBackend>, session_ttl_minutes: u64) -> Self {
        Self {
            guard: Arc::new(GuardService::new(backend.clone())),
            workflow: Arc::new(WorkflowService::new(backend.clone())),
            importer: Arc::new(ImporterService::new(backend.clone())),
            backend,
            session_ttl_minutes,
        }
    }
}

// ============================================================================
// Error envelope
// ============================================================================

/// Inner payload of the error envelope
#[derive(Debug, Serialize)]
pub struct ApiErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// JSON error envelope returned by every failing endpoint
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ApiErrorDetail,
}

impl ApiError {
    /// Create a new API error
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ApiErrorDetail {
                code: code.into(),
                message: message.into(),
                details: None,
            },
        }
    }

    /// Create an API error with extra details
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            error: ApiErrorDetail {
                code: code.into(),
                message: message.into(),
                details: Some(details),
            },
        }
    }

    /// 400 Bad Request
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// 401 Unauthorized, pointing the console at the login page
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::with_details(
            "UNAUTHORIZED",
            message,
            serde_json::json!({ "redirect": "/user/auth" }),
        )
    }

    /// 403 Forbidden, pointing the console at the home page
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::with_details("FORBIDDEN", message, serde_json::json!({ "redirect": "/" }))
    }

    /// 404 Not Found
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new("NOT_FOUND", message)
    }

    /// 502 Bad Gateway, for backend failures
    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self::new("BAD_GATEWAY", message)
    }

    /// 500 Internal Server Error
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.error.code.as_str() {
            "VALIDATION_ERROR" => StatusCode::BAD_REQUEST,
            "UNAUTHORIZED" => StatusCode::UNAUTHORIZED,
            "FORBIDDEN" => StatusCode::FORBIDDEN,
            "NOT_FOUND" => StatusCode::NOT_FOUND,
            "BAD_GATEWAY" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

impl From<GuardError> for ApiError {
    fn from(err: GuardError) -> Self {
        match err {
            GuardError::NotLoggedIn => ApiError::unauthorized(err.to_string()),
            GuardError::Unauthorized { .. } => ApiError::forbidden(err.to_string()),
            // Revalidation could not complete, so the claim stays untrusted
            GuardError::Backend(_) => ApiError::unauthorized(GuardError::NotLoggedIn.to_string()),
        }
    }
}

impl From<WorkflowError> for ApiError {
    fn from(err: WorkflowError) -> Self {
        match err {
            WorkflowError::Validation(_) | WorkflowError::BatchSize(_) => {
                ApiError::validation_error(err.to_string())
            }
            WorkflowError::NotFound => ApiError::not_found("Question not found"),
            WorkflowError::Backend(e) => ApiError::bad_gateway(e.to_string()),
        }
    }
}

impl From<ImporterError> for ApiError {
    fn from(err: ImporterError) -> Self {
        match err {
            ImporterError::UnknownCategory(_) => ApiError::validation_error(err.to_string()),
            ImporterError::Backend(e) => ApiError::bad_gateway(e.to_string()),
        }
    }
}

// ============================================================================
// Session cookie codec
// ============================================================================

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "session";

/// Encode a session claim into a Set-Cookie value.
///
/// The claim is JSON, percent-encoded so separators survive the cookie
/// grammar. HttpOnly keeps it away from page scripts.
pub fn session_cookie(session: &Session, ttl_minutes: u64) -> Result<String, ApiError> {
    let claim = serde_json::to_string(session)
        .map_err(|e| ApiError::internal_error(format!("Failed to encode session: {}", e)))?;
    Ok(format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE,
        urlencoding::encode(&claim),
        ttl_minutes * 60
    ))
}

/// Set-Cookie value that clears the session cookie
pub fn clear_session_cookie() -> String {
    format!(
        "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
        SESSION_COOKIE
    )
}

/// Extract the session claim from request headers.
///
/// A missing cookie, a cookie that is not valid percent-encoded JSON, and a
/// claim missing any field all yield `None`; the guard treats every one of
/// those as "not logged in".
pub fn extract_session(headers: &HeaderMap) -> Option<Session> {
    let cookie_header = headers.get(header::COOKIE)?.to_str().ok()?;
    let raw = cookie_header
        .split(';')
        .map(str::trim)
        .find_map(|c| c.strip_prefix("session="))?;
    let claim = urlencoding::decode(raw).ok()?;
    serde_json::from_str(&claim).ok()
}

// ============================================================================
// Guard middleware
// ============================================================================

/// Extension carrying the revalidated author of the current request
#[derive(Debug, Clone)]
pub struct CurrentAuthor(pub Author);

impl<S> FromRequestParts<S> for CurrentAuthor
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentAuthor>()
            .cloned()
            .ok_or_else(|| ApiError::unauthorized("You must login first"))
    }
}

/// Middleware requiring a revalidated session.
///
/// The cookie is only a claim; the author list is consulted on every
/// guarded request, and the resolved author is stored as an extension.
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let session = extract_session(request.headers());
    let author = state.guard.validate_session(session.as_ref()).await?;
    request.extensions_mut().insert(CurrentAuthor(author));
    Ok(next.run(request).await)
}

/// Middleware requiring the editor or admin role.
///
/// Must run after `require_session`.
pub async fn require_reviewer(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let author = request
        .extensions()
        .get::<CurrentAuthor>()
        .cloned()
        .ok_or_else(|| ApiError::unauthorized("You must login first"))?;
    state.guard.require_reviewer(&author.0)?;
    Ok(next.run(request).await)
}

/// Middleware requiring the admin role.
///
/// Must run after `require_session`.
pub async fn require_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let author = request
        .extensions()
        .get::<CurrentAuthor>()
        .cloned()
        .ok_or_else(|| ApiError::unauthorized("You must login first"))?;
    state.guard.require_admin(&author.0)?;
    Ok(next.run(request).await)
}
