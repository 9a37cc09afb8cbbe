//! Reference API endpoints
//!
//! Handles HTTP requests for news-based drafting:
//! - GET /api/v1/reference/news - Browse the news feed for a source/category
//! - POST /api/v1/reference/seed - Turn a news item into a draft prefill
//!
//! All routes sit behind the session guard.

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use crate::api::middleware::{ApiError, AppState};
use crate::models::{NewsReference, NewsSource};
use crate::services::DraftSeed;

/// Query parameters for the news feed
#[derive(Debug, Deserialize)]
pub struct NewsQuery {
    pub source: String,
    pub category: String,
}

/// Request body for seeding a draft from a news item
#[derive(Debug, Deserialize)]
pub struct SeedRequest {
    pub reference: NewsReference,
    pub category: String,
}

/// Build the reference router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/news", get(fetch_news))
        .route("/seed", post(seed_draft))
}

/// GET /api/v1/reference/news - Browse the news feed
async fn fetch_news(
    State(state): State<AppState>,
    Query(query): Query<NewsQuery>,
) -> Result<Json<Vec<NewsReference>>, ApiError> {
    let source: NewsSource = query
        .source
        .parse()
        .map_err(|e: anyhow::Error| ApiError::validation_error(e.to_string()))?;

    let items = state.importer.fetch_news(source, &query.category).await?;
    Ok(Json(items))
}

/// POST /api/v1/reference/seed - Turn a news item into a draft prefill
///
/// The seed carries the summary, image and category; the question text
/// comes back blank for the author to write.
async fn seed_draft(
    State(state): State<AppState>,
    Json(body): Json<SeedRequest>,
) -> Result<Json<DraftSeed>, ApiError> {
    let seed = state.importer.seed_draft(&body.reference, &body.category)?;
    Ok(Json(seed))
}
