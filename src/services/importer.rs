//! Reference importer service
//!
//! Fetches news items from the backend feed and turns a chosen item into
//! a draft seed. The seed carries the summary, image and category; the
//! question text stays blank for the author to write.

use crate::backend::{BackendError, QuizBackend};
use crate::models::{is_known_category, NewsReference, NewsSource};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Error types for importer operations
#[derive(Debug, thiserror::Error)]
pub enum ImporterError {
    /// The category is not in the accepted set
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// The backend could not be reached or answered abnormally
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),
}

/// Prefill for the draft form, produced from a news reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftSeed {
    /// Question text, always blank in a fresh seed
    pub question: String,
    /// Category the news item was browsed under
    pub category: String,
    /// Illustration image carried over from the reference
    pub image_url: Option<String>,
    /// Source summary carried over from the reference
    pub news_summary: Option<String>,
}

/// Importer service for news-based drafting
pub struct ImporterService {
    backend: Arc<dyn QuizBackend>,
}

impl ImporterService {
    /// Create a new importer service
    pub fn new(backend: Arc<dyn QuizBackend>) -> Self {
        Self { backend }
    }

    /// Fetch the news feed for a source and category
    pub async fn fetch_news(
        &self,
        source: NewsSource,
        category: &str,
    ) -> Result<Vec<NewsReference>, ImporterError> {
        if !is_known_category(category) {
            return Err(ImporterError::UnknownCategory(category.to_string()));
        }
        Ok(self.backend.fetch_news(source, category).await?)
    }

    /// Turn a news reference into a draft seed.
    ///
    /// The headline is context for the author and never becomes question
    /// copy; an empty summary yields no summary at all.
    pub fn seed_draft(
        &self,
        reference: &NewsReference,
        category: &str,
    ) -> Result<DraftSeed, ImporterError> {
        if !is_known_category(category) {
            return Err(ImporterError::UnknownCategory(category.to_string()));
        }

        let news_summary = if reference.summary.trim().is_empty() {
            None
        } else {
            Some(reference.summary.clone())
        };

        Ok(DraftSeed {
            question: String::new(),
            category: category.to_string(),
            image_url: reference.image_url.clone(),
            news_summary,
        })
    }
}
