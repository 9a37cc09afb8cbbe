//! Author model
//!
//! This module defines the Author entity and related types for the Quizdesk console.
//! Author accounts live in the remote quiz backend; the console only reads them
//! for sign-in and access checks, and creates new ones on behalf of admins.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Author entity representing a console account.
///
/// Authors have different roles (Admin, Editor, Creator) which determine
/// what they may do in the console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Unique identifier
    pub id: i64,
    /// Username (unique)
    pub username: String,
    /// Author role
    pub role: Role,
}

impl Author {
    /// Check if the author is an administrator
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Check if the author may review drafts (editor or higher)
    pub fn is_reviewer(&self) -> bool {
        matches!(self.role, Role::Admin | Role::Editor)
    }
}

/// Author role for authorization.
///
/// - Admin: full access, including account creation
/// - Editor: may review and publish drafts
/// - Creator: may author drafts only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Administrator - full access
    Admin,
    /// Editor - may approve and revoke drafts
    Editor,
    /// Creator - may author drafts only
    Creator,
}

impl Default for Role {
    fn default() -> Self {
        Self::Creator
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Editor => write!(f, "editor"),
            Role::Creator => write!(f, "creator"),
        }
    }
}

impl FromStr for Role {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "editor" => Ok(Role::Editor),
            "creator" => Ok(Role::Creator),
            _ => Err(anyhow::anyhow!("Invalid author role: {}", s)),
        }
    }
}

/// Identity returned by the backend after a successful credential check
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerifiedAuthor {
    /// Unique identifier
    pub id: i64,
    /// Username
    pub username: String,
}

/// Input for creating a new author account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAuthor {
    /// Full display name
    pub full_name: String,
    /// Username (unique)
    pub username: String,
    /// Plaintext password (hashed by the backend)
    pub password: String,
    /// Email address
    pub email: String,
    /// Phone number
    pub phone_number: String,
    /// Role for the new account
    pub role: Role,
}

/// Session entity carried in the console cookie.
///
/// The backend author record stays authoritative; this is only the local
/// claim that gets revalidated on every guarded request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Backend author id
    pub user_id: i64,
    /// Username at sign-in time
    pub username: String,
    /// Expiration timestamp
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Create a session for the given author, expiring after `ttl_minutes`
    pub fn new(user_id: i64, username: String, ttl_minutes: u64) -> Self {
        Self {
            user_id,
            username,
            expires_at: Utc::now() + chrono::Duration::minutes(ttl_minutes as i64),
        }
    }

    /// Check if the session has expired
    pub fn is_expired(&self) -> bool {
        self.expires_at < Utc::now()
    }
}
