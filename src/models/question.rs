//! Question model
//!
//! This module provides:
//! - `Question` entity representing a quiz question
//! - `QuestionStatus` enum for the draft/published lifecycle
//! - `Difficulty` enum
//! - Input types for creating and patching questions
//! - Pagination types for list queries

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Categories accepted for questions and news lookups
pub const CATEGORIES: [&str; 16] = [
    "sports",
    "politics",
    "history",
    "world",
    "technology",
    "entertainment",
    "business",
    "health",
    "science",
    "education",
    "lifestyle",
    "finance",
    "startup",
    "trending",
    "cricket",
    "football",
];

/// Check whether a category is in the accepted set
pub fn is_known_category(category: &str) -> bool {
    CATEGORIES.iter().any(|c| *c == category)
}

/// Question entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier
    pub id: i64,
    /// Question text
    pub question: String,
    /// Answer option 1
    pub option_1: String,
    /// Answer option 2
    pub option_2: String,
    /// Answer option 3
    pub option_3: String,
    /// Answer option 4
    pub option_4: String,
    /// Index of the correct option (1 through 4)
    pub correct_option: u8,
    /// Category name
    pub category: String,
    /// Difficulty level
    pub difficulty: Difficulty,
    /// Illustration image URL
    #[serde(default)]
    pub image_url: Option<String>,
    /// Source news summary
    #[serde(default)]
    pub news_summary: Option<String>,
    /// Publication status
    pub status: QuestionStatus,
    /// Owning author ID
    pub author_id: i64,
}

/// Question publication status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionStatus {
    /// Draft - awaiting review, not visible to players
    Draft,
    /// Published - live in the quiz pool
    Published,
}

impl Default for QuestionStatus {
    fn default() -> Self {
        Self::Draft
    }
}

impl QuestionStatus {
    /// Convert status to its wire string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionStatus::Draft => "draft",
            QuestionStatus::Published => "published",
        }
    }
}

impl fmt::Display for QuestionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for QuestionStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(QuestionStatus::Draft),
            "published" => Ok(QuestionStatus::Published),
            _ => Err(anyhow::anyhow!("Invalid question status: {}", s)),
        }
    }
}

/// Question difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(anyhow::anyhow!("Invalid difficulty: {}", s)),
        }
    }
}

/// Input for one new question draft
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionDraft {
    /// Question text
    pub question: String,
    /// Answer option 1
    pub option_1: String,
    /// Answer option 2
    pub option_2: String,
    /// Answer option 3
    pub option_3: String,
    /// Answer option 4
    pub option_4: String,
    /// Index of the correct option (1 through 4)
    pub correct_option: u8,
    /// Category name
    pub category: String,
    /// Difficulty level
    pub difficulty: Difficulty,
    /// Illustration image URL
    #[serde(default)]
    pub image_url: Option<String>,
    /// Source news summary
    #[serde(default)]
    pub news_summary: Option<String>,
}

/// Input for patching an existing question
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestionPatch {
    /// New question text (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    /// New option 1 (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option_1: Option<String>,
    /// New option 2 (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option_2: Option<String>,
    /// New option 3 (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option_3: Option<String>,
    /// New option 4 (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option_4: Option<String>,
    /// New correct option index (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_option: Option<u8>,
    /// New category (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// New difficulty (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    /// New image URL (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// New news summary (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub news_summary: Option<String>,
    /// New status (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<QuestionStatus>,
}

impl QuestionPatch {
    /// Create a new empty patch
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the status
    pub fn with_status(mut self, status: QuestionStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Check if any field is set
    pub fn has_changes(&self) -> bool {
        self.question.is_some()
            || self.option_1.is_some()
            || self.option_2.is_some()
            || self.option_3.is_some()
            || self.option_4.is_some()
            || self.correct_option.is_some()
            || self.category.is_some()
            || self.difficulty.is_some()
            || self.image_url.is_some()
            || self.news_summary.is_some()
            || self.status.is_some()
    }

    /// Apply the patch on top of an existing question, yielding the
    /// content a backend write would produce
    pub fn apply_to(&self, question: &Question) -> Question {
        let mut updated = question.clone();
        if let Some(q) = &self.question {
            updated.question = q.clone();
        }
        if let Some(o) = &self.option_1 {
            updated.option_1 = o.clone();
        }
        if let Some(o) = &self.option_2 {
            updated.option_2 = o.clone();
        }
        if let Some(o) = &self.option_3 {
            updated.option_3 = o.clone();
        }
        if let Some(o) = &self.option_4 {
            updated.option_4 = o.clone();
        }
        if let Some(c) = self.correct_option {
            updated.correct_option = c;
        }
        if let Some(c) = &self.category {
            updated.category = c.clone();
        }
        if let Some(d) = self.difficulty {
            updated.difficulty = d;
        }
        if let Some(u) = &self.image_url {
            updated.image_url = Some(u.clone());
        }
        if let Some(s) = &self.news_summary {
            updated.news_summary = Some(s.clone());
        }
        if let Some(s) = self.status {
            updated.status = s;
        }
        updated
    }
}

/// Filters for listing questions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestionFilter {
    /// Filter by status
    pub status: Option<QuestionStatus>,
    /// Filter by category
    pub category: Option<String>,
    /// Filter by difficulty
    pub difficulty: Option<Difficulty>,
    /// Filter by owning author
    pub author_id: Option<i64>,
    /// Filter by source news date (YYYY-MM-DD)
    pub news_date: Option<String>,
}

/// Pagination parameters for list queries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListParams {
    /// Page number (1-indexed)
    pub page: u32,
    /// Number of items per page
    pub page_size: u32,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 10,
        }
    }
}

impl ListParams {
    /// Create new pagination parameters
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.clamp(1, 100),
        }
    }
}

/// One page of questions as returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionPage {
    /// Questions in the current page
    pub result: Vec<Question>,
    /// Next page number, if there is one
    pub next_page: Option<u32>,
}

impl QuestionPage {
    /// Check if the page is empty
    pub fn is_empty(&self) -> bool {
        self.result.is_empty()
    }
}
