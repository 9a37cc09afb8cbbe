//! API layer - HTTP handlers and routing
//!
//! This module contains all HTTP API endpoints for the Quizdesk console.
//! It includes:
//! - Auth endpoints (login, logout, current author)
//! - Question endpoints (list, batch create, get, edit, delete)
//! - Review endpoints (queue head, approve, revoke)
//! - Reference endpoints (news feed, draft seeding)
//! - Author account endpoints (admin-only creation)

pub mod auth;
pub mod authors;
pub mod middleware;
pub mod questions;
pub mod reference;
pub mod review;

use axum::{
    http::{header, HeaderValue, Method},
    middleware as axum_middleware,
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use middleware::{ApiError, AppState, CurrentAuthor};

/// Build the main API router
pub fn build_api_router(state: AppState) -> Router<AppState> {
    // Admin routes (account administration)
    let admin_routes = Router::new()
        .nest("/authors", authors::router())
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::require_admin,
        ))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::require_session,
        ));

    // Reviewer routes (editor or admin)
    let reviewer_routes = Router::new()
        .nest("/review", review::router())
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::require_reviewer,
        ))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::require_session,
        ));

    // Session routes (any signed-in author)
    let session_routes = Router::new()
        .nest("/auth", auth::protected_router())
        .nest("/questions", questions::router())
        .nest("/reference", reference::router())
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::require_session,
        ));

    // Public routes
    Router::new()
        .nest("/auth", auth::public_router())
        .merge(session_routes)
        .merge(reviewer_routes)
        .merge(admin_routes)
}

/// Build the complete router with middleware
pub fn build_router(state: AppState, cors_origin: &str) -> anyhow::Result<Router> {
    // The console runs on a different origin and sends the session
    // cookie cross-site, so credentials must be allowed
    let cors = CorsLayer::new()
        .allow_origin(cors_origin.parse::<HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::COOKIE])
        .allow_credentials(true);

    Ok(Router::new()
        .nest("/api/v1", build_api_router(state.clone()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}
