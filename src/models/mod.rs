//! Data models
//!
//! This module contains all data structures used throughout the Quizdesk console.
//! Models represent:
//! - Backend entities (Author, Question, NewsReference)
//! - The local session claim
//! - Internal data transfer objects

mod author;
mod news;
mod question;

pub use author::{Author, NewAuthor, Role, Session, VerifiedAuthor};
pub use news::{NewsReference, NewsSource};
pub use question::{
    is_known_category, Difficulty, ListParams, Question, QuestionDraft, QuestionFilter,
    QuestionPage, QuestionPatch, QuestionStatus, CATEGORIES,
};
