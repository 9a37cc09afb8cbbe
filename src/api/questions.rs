//! Question API endpoints
//!
//! Handles HTTP requests for the question workflow:
//! - GET /api/v1/questions - List questions with filters and paging
//! - POST /api/v1/questions - Create a batch of drafts
//! - GET /api/v1/questions/{id} - Get a question
//! - PATCH /api/v1/questions/{id} - Edit a question
//! - DELETE /api/v1/questions/{id} - Delete a question
//!
//! All routes sit behind the session guard.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::api::middleware::{ApiError, AppState, CurrentAuthor};
use crate::models::{
    Difficulty, ListParams, Question, QuestionDraft, QuestionFilter, QuestionPage, QuestionPatch,
    QuestionStatus,
};

/// Query parameters for question listing
#[derive(Debug, Default, Deserialize)]
pub struct ListQuestionsQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub status: Option<String>,
    pub category: Option<String>,
    pub difficulty: Option<String>,
    pub author_id: Option<i64>,
    pub news_date: Option<String>,
}

/// Request body for batch draft creation
#[derive(Debug, Deserialize)]
pub struct CreateQuestionsRequest {
    pub questions: Vec<QuestionDraft>,
}

/// Response for batch draft creation
#[derive(Debug, Serialize)]
pub struct CreateQuestionsResponse {
    pub created: usize,
}

/// Build the questions router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_questions).post(create_questions))
        .route(
            "/{id}",
            get(get_question)
                .patch(update_question)
                .delete(delete_question),
        )
}

/// GET /api/v1/questions - List questions
async fn list_questions(
    State(state): State<AppState>,
    Query(query): Query<ListQuestionsQuery>,
) -> Result<Json<QuestionPage>, ApiError> {
    let filter = filter_from_query(&query)?;
    let params = ListParams::new(query.page.unwrap_or(1), query.page_size.unwrap_or(10));

    let page = state.workflow.list_questions(&filter, &params).await?;
    Ok(Json(page))
}

/// POST /api/v1/questions - Create a batch of drafts
///
/// Every stored record carries draft status and the session author's id,
/// whatever the payload claims.
async fn create_questions(
    State(state): State<AppState>,
    CurrentAuthor(author): CurrentAuthor,
    Json(body): Json<CreateQuestionsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let created = state.workflow.create_drafts(&author, &body.questions).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreateQuestionsResponse { created }),
    ))
}

/// GET /api/v1/questions/{id} - Get a question
async fn get_question(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Question>, ApiError> {
    let question = state.workflow.get_question(id).await?;
    Ok(Json(question))
}

/// PATCH /api/v1/questions/{id} - Edit a question
///
/// The patched content is revalidated before the write reaches the
/// backend; an empty patch returns the stored record untouched.
async fn update_question(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<QuestionPatch>,
) -> Result<Json<Question>, ApiError> {
    let question = state.workflow.update_question(id, &patch).await?;
    Ok(Json(question))
}

/// DELETE /api/v1/questions/{id} - Delete a question
async fn delete_question(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state.workflow.delete_question(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Translate raw query strings into the typed filter.
///
/// Unknown status or difficulty values are rejected rather than silently
/// widened into an unfiltered listing.
fn filter_from_query(query: &ListQuestionsQuery) -> Result<QuestionFilter, ApiError> {
    let status = query
        .status
        .as_deref()
        .map(str::parse::<QuestionStatus>)
        .transpose()
        .map_err(|e| ApiError::validation_error(e.to_string()))?;
    let difficulty = query
        .difficulty
        .as_deref()
        .map(str::parse::<Difficulty>)
        .transpose()
        .map_err(|e| ApiError::validation_error(e.to_string()))?;

    Ok(QuestionFilter {
        status,
        category: query.category.clone(),
        difficulty,
        author_id: query.author_id,
        news_date: query.news_date.clone(),
    })
}
