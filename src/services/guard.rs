//! Authorization guard service
//!
//! Implements session revalidation and role policy:
//! - A session cookie is only a local claim; every guarded request is
//!   checked against the backend author list before it proceeds
//! - Editors and admins may review drafts; only admins may create accounts
//! - A backend failure during revalidation denies access rather than
//!   trusting the stale local claim

use crate::backend::{BackendError, QuizBackend};
use crate::models::{Author, Session};
use std::sync::Arc;
use tracing::warn;

/// Error types for guard operations
#[derive(Debug, thiserror::Error)]
pub enum GuardError {
    /// No session, an expired session, or a claim the backend does not recognize
    #[error("You must login first")]
    NotLoggedIn,

    /// The author exists but the role does not permit the operation
    #[error("{role} don't have access to {operation}")]
    Unauthorized { role: String, operation: String },

    /// The backend could not be reached or answered abnormally
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),
}

/// Guard service validating sessions and enforcing role policy
pub struct GuardService {
    backend: Arc<dyn QuizBackend>,
}

impl GuardService {
    /// Create a new guard service
    pub fn new(backend: Arc<dyn QuizBackend>) -> Self {
        Self { backend }
    }

    /// Revalidate a session claim against the backend author list.
    ///
    /// Absent and expired sessions fail without any backend call. A claim
    /// only passes when an author with the same id AND username exists.
    pub async fn validate_session(
        &self,
        session: Option<&Session>,
    ) -> Result<Author, GuardError> {
        let session = session.ok_or(GuardError::NotLoggedIn)?;

        if session.username.trim().is_empty() || session.user_id <= 0 {
            return Err(GuardError::NotLoggedIn);
        }
        if session.is_expired() {
            return Err(GuardError::NotLoggedIn);
        }

        let authors = self.backend.list_authors(None).await.map_err(|e| {
            warn!("session revalidation failed: {}", e);
            GuardError::Backend(e)
        })?;

        authors
            .into_iter()
            .find(|a| a.id == session.user_id && a.username == session.username)
            .ok_or(GuardError::NotLoggedIn)
    }

    /// Require a role that may review drafts (editor or admin)
    pub fn require_reviewer(&self, author: &Author) -> Result<(), GuardError> {
        if author.is_reviewer() {
            Ok(())
        } else {
            Err(GuardError::Unauthorized {
                role: author.role.to_string(),
                operation: "review questions".to_string(),
            })
        }
    }

    /// Require the admin role (account creation)
    pub fn require_admin(&self, author: &Author) -> Result<(), GuardError> {
        if author.is_admin() {
            Ok(())
        } else {
            Err(GuardError::Unauthorized {
                role: author.role.to_string(),
                operation: "Create User".to_string(),
            })
        }
    }
}
