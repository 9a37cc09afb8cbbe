//! Question lifecycle service
//!
//! Implements business logic for the question workflow:
//! - Draft validation (shared by create and edit)
//! - Batch draft creation (1 to 3 per submission)
//! - Listing, editing, deleting questions
//! - The review queue: approve and revoke, both idempotent

use crate::backend::{BackendError, QuizBackend};
use crate::models::{
    is_known_category, Author, ListParams, Question, QuestionDraft, QuestionFilter, QuestionPage,
    QuestionPatch, QuestionStatus,
};
use std::sync::Arc;
use tracing::info;

/// Maximum question text length in characters
pub const MAX_QUESTION_LEN: usize = 100;
/// Maximum answer option length in characters
pub const MAX_OPTION_LEN: usize = 30;
/// Maximum news summary length in characters
pub const MAX_SUMMARY_LEN: usize = 500;
/// Maximum number of drafts per submission
pub const MAX_BATCH_SIZE: usize = 3;

/// One violated draft constraint.
///
/// Violations are detected locally so an invalid draft never produces
/// a backend write.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DraftViolation {
    #[error("Question text must not be empty")]
    EmptyQuestion,
    #[error("Question text must be at most {MAX_QUESTION_LEN} characters (got {0})")]
    QuestionTooLong(usize),
    #[error("Option {0} must not be empty")]
    EmptyOption(u8),
    #[error("Option {0} must be at most {MAX_OPTION_LEN} characters (got {1})")]
    OptionTooLong(u8, usize),
    #[error("Correct option must be between 1 and 4 (got {0})")]
    CorrectOptionOutOfRange(u8),
    #[error("Unknown category: {0}")]
    UnknownCategory(String),
    #[error("News summary must not be empty when present")]
    EmptySummary,
    #[error("News summary must be at most {MAX_SUMMARY_LEN} characters (got {0})")]
    SummaryTooLong(usize),
}

/// Error types for workflow operations
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    /// A draft failed validation
    #[error("Validation error: {0}")]
    Validation(#[from] DraftViolation),

    /// Submission carried no drafts or too many
    #[error("A submission must contain between 1 and {MAX_BATCH_SIZE} drafts (got {0})")]
    BatchSize(usize),

    /// The question does not exist
    #[error("Question not found")]
    NotFound,

    /// The backend could not be reached or answered abnormally
    #[error("Backend error: {0}")]
    Backend(BackendError),
}

impl From<BackendError> for WorkflowError {
    fn from(e: BackendError) -> Self {
        match e {
            BackendError::NotFound => WorkflowError::NotFound,
            other => WorkflowError::Backend(other),
        }
    }
}

/// Validate one draft against all content constraints.
///
/// Returns the first violation found, checking fields in form order.
pub fn validate_draft(draft: &QuestionDraft) -> Result<(), DraftViolation> {
    validate_content(
        &draft.question,
        [
            &draft.option_1,
            &draft.option_2,
            &draft.option_3,
            &draft.option_4,
        ],
        draft.correct_option,
        &draft.category,
        draft.news_summary.as_deref(),
    )
}

fn validate_content(
    question: &str,
    options: [&str; 4],
    correct_option: u8,
    category: &str,
    news_summary: Option<&str>,
) -> Result<(), DraftViolation> {
    if question.trim().is_empty() {
        return Err(DraftViolation::EmptyQuestion);
    }
    let question_len = question.chars().count();
    if question_len > MAX_QUESTION_LEN {
        return Err(DraftViolation::QuestionTooLong(question_len));
    }

    for (index, option) in options.iter().enumerate() {
        let number = (index + 1) as u8;
        if option.trim().is_empty() {
            return Err(DraftViolation::EmptyOption(number));
        }
        let option_len = option.chars().count();
        if option_len > MAX_OPTION_LEN {
            return Err(DraftViolation::OptionTooLong(number, option_len));
        }
    }

    if !(1..=4).contains(&correct_option) {
        return Err(DraftViolation::CorrectOptionOutOfRange(correct_option));
    }

    if !is_known_category(category) {
        return Err(DraftViolation::UnknownCategory(category.to_string()));
    }

    if let Some(summary) = news_summary {
        if summary.trim().is_empty() {
            return Err(DraftViolation::EmptySummary);
        }
        let summary_len = summary.chars().count();
        if summary_len > MAX_SUMMARY_LEN {
            return Err(DraftViolation::SummaryTooLong(summary_len));
        }
    }

    Ok(())
}

/// Workflow service for the question lifecycle
pub struct WorkflowService {
    backend: Arc<dyn QuizBackend>,
}

impl WorkflowService {
    /// Create a new workflow service
    pub fn new(backend: Arc<dyn QuizBackend>) -> Self {
        Self { backend }
    }

    /// Create a batch of drafts on behalf of an author.
    ///
    /// The whole batch is validated before anything is written; every
    /// stored record gets draft status and the submitting author's id,
    /// whatever the input claims.
    pub async fn create_drafts(
        &self,
        author: &Author,
        drafts: &[QuestionDraft],
    ) -> Result<usize, WorkflowError> {
        if drafts.is_empty() || drafts.len() > MAX_BATCH_SIZE {
            return Err(WorkflowError::BatchSize(drafts.len()));
        }
        for draft in drafts {
            validate_draft(draft)?;
        }

        let questions: Vec<Question> = drafts
            .iter()
            .map(|draft| Question {
                id: 0, // Will be set by the backend
                question: draft.question.clone(),
                option_1: draft.option_1.clone(),
                option_2: draft.option_2.clone(),
                option_3: draft.option_3.clone(),
                option_4: draft.option_4.clone(),
                correct_option: draft.correct_option,
                category: draft.category.clone(),
                difficulty: draft.difficulty,
                image_url: draft.image_url.clone(),
                news_summary: draft.news_summary.clone(),
                status: QuestionStatus::Draft,
                author_id: author.id,
            })
            .collect();

        self.backend.create_questions(&questions).await?;
        info!("author {} created {} draft(s)", author.id, questions.len());
        Ok(questions.len())
    }

    /// List questions matching the filter
    pub async fn list_questions(
        &self,
        filter: &QuestionFilter,
        params: &ListParams,
    ) -> Result<QuestionPage, WorkflowError> {
        Ok(self.backend.list_questions(filter, params).await?)
    }

    /// Get a question by ID
    pub async fn get_question(&self, id: i64) -> Result<Question, WorkflowError> {
        Ok(self.backend.get_question(id).await?)
    }

    /// Patch a question, revalidating the resulting content first
    pub async fn update_question(
        &self,
        id: i64,
        patch: &QuestionPatch,
    ) -> Result<Question, WorkflowError> {
        let current = self.backend.get_question(id).await?;
        if !patch.has_changes() {
            return Ok(current);
        }

        let updated = patch.apply_to(&current);
        validate_content(
            &updated.question,
            [
                &updated.option_1,
                &updated.option_2,
                &updated.option_3,
                &updated.option_4,
            ],
            updated.correct_option,
            &updated.category,
            updated.news_summary.as_deref(),
        )?;

        Ok(self.backend.update_question(id, patch).await?)
    }

    /// Delete a question
    pub async fn delete_question(&self, id: i64) -> Result<(), WorkflowError> {
        self.backend.delete_question(id).await?;
        info!("deleted question {}", id);
        Ok(())
    }

    /// Fetch the head of the review queue: the first draft in backend order.
    ///
    /// Queried fresh each time so the queue stays authoritative across
    /// approvals made from other sessions.
    pub async fn next_draft(&self) -> Result<Option<Question>, WorkflowError> {
        let filter = QuestionFilter {
            status: Some(QuestionStatus::Draft),
            ..Default::default()
        };
        let page = self
            .backend
            .list_questions(&filter, &ListParams::new(1, 1))
            .await?;
        Ok(page.result.into_iter().next())
    }

    /// Publish a draft. Approving an already published question is a no-op.
    pub async fn approve(&self, id: i64) -> Result<Question, WorkflowError> {
        self.set_status(id, QuestionStatus::Published).await
    }

    /// Send a published question back to draft. Idempotent likewise.
    pub async fn revoke(&self, id: i64) -> Result<Question, WorkflowError> {
        self.set_status(id, QuestionStatus::Draft).await
    }

    async fn set_status(
        &self,
        id: i64,
        status: QuestionStatus,
    ) -> Result<Question, WorkflowError> {
        let current = self.backend.get_question(id).await?;
        if current.status == status {
            return Ok(current);
        }

        let patch = QuestionPatch::new().with_status(status);
        let updated = self.backend.update_question(id, &patch).await?;
        info!("question {} is now {}", id, status);
        Ok(updated)
    }
}
