//! Services layer - Business logic
//!
//! This module contains all business logic services for the Quizdesk console.
//! Services are responsible for:
//! - Revalidating sessions and enforcing role policy
//! - The question draft/publish workflow and its validation
//! - Seeding drafts from the news feed

pub mod guard;
pub mod importer;
pub mod workflow;

pub use guard::{GuardError, GuardService};
pub use importer::{DraftSeed, ImporterError, ImporterService};
pub use workflow::{
    validate_draft, DraftViolation, WorkflowError, WorkflowService, MAX_BATCH_SIZE,
    MAX_OPTION_LEN, MAX_QUESTION_LEN, MAX_SUMMARY_LEN,
};
