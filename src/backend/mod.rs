//! Quiz backend access
//!
//! This module provides:
//! - `QuizBackend` trait defining the interface to the remote quiz API
//! - `HttpQuizBackend` implementing the trait over HTTP
//!
//! All author and question state lives in the remote backend; the console
//! never persists any of it locally.

mod http;
#[cfg(test)]
pub mod testing;

pub use http::HttpQuizBackend;

use crate::models::{
    Author, ListParams, NewAuthor, NewsReference, NewsSource, Question, QuestionFilter,
    QuestionPage, QuestionPatch, Role, VerifiedAuthor,
};
use async_trait::async_trait;

/// Error type for backend access
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The request never produced a response (DNS, connect, timeout)
    #[error("Request to '{url}' failed: {source}")]
    RequestFailed {
        url: String,
        source: reqwest::Error,
    },
    /// The backend answered with a non-success status
    #[error("Backend returned status {status} for '{url}'")]
    UnexpectedStatus { url: String, status: u16 },
    /// The requested record does not exist
    #[error("Record not found")]
    NotFound,
    /// The response body could not be decoded
    #[error("Failed to decode backend response from '{url}': {message}")]
    Decode { url: String, message: String },
}

/// Quiz backend trait
#[async_trait]
pub trait QuizBackend: Send + Sync {
    /// Verify sign-in credentials; `None` means the credentials were rejected
    async fn verify_creds(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<VerifiedAuthor>, BackendError>;

    /// List author accounts, optionally filtered by role
    async fn list_authors(&self, role: Option<Role>) -> Result<Vec<Author>, BackendError>;

    /// Create a new author account
    async fn create_author(&self, author: &NewAuthor) -> Result<(), BackendError>;

    /// List questions matching the filter, one page at a time
    async fn list_questions(
        &self,
        filter: &QuestionFilter,
        params: &ListParams,
    ) -> Result<QuestionPage, BackendError>;

    /// Get a question by ID
    async fn get_question(&self, id: i64) -> Result<Question, BackendError>;

    /// Create a batch of questions
    async fn create_questions(&self, questions: &[Question]) -> Result<(), BackendError>;

    /// Patch a question and return the stored record
    async fn update_question(
        &self,
        id: i64,
        patch: &QuestionPatch,
    ) -> Result<Question, BackendError>;

    /// Delete a question
    async fn delete_question(&self, id: i64) -> Result<(), BackendError>;

    /// Fetch the news feed for a source and category
    async fn fetch_news(
        &self,
        source: NewsSource,
        category: &str,
    ) -> Result<Vec<NewsReference>, BackendError>;
}
