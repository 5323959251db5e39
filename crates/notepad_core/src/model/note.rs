//! Note domain model.
//!
//! # Responsibility
//! - Define the canonical note record handed to formatters and services.
//! - Keep "absent content" distinct from "empty content".
//!
//! # Invariants
//! - `id` is stable and never reused for another note.
//! - `user_id` is never blank.
//! - `updated_at >= created_at`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for one note.
pub type NoteId = Uuid;

/// Opaque user identifier issued by the identity provider.
pub type UserId = String;

/// Canonical note record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    /// Owning user.
    pub user_id: UserId,
    /// Display title. May be empty.
    pub title: String,
    /// `None` means the note never had a body; `Some("")` means it was cleared.
    pub content: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Must not be earlier than `created_at`.
    pub updated_at: DateTime<Utc>,
}

/// Borrowed three-way view over optional note content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteContent<'a> {
    Absent,
    Empty,
    Present(&'a str),
}

impl<'a> NoteContent<'a> {
    pub fn from_option(content: Option<&'a str>) -> Self {
        match content {
            None => Self::Absent,
            Some("") => Self::Empty,
            Some(text) => Self::Present(text),
        }
    }
}

/// Validation failures for note invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteValidationError {
    BlankOwner,
    UpdatedBeforeCreated {
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    },
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankOwner => write!(f, "note owner id must not be blank"),
            Self::UpdatedBeforeCreated {
                created_at,
                updated_at,
            } => write!(
                f,
                "updated_at ({}) is earlier than created_at ({})",
                updated_at.to_rfc3339(),
                created_at.to_rfc3339()
            ),
        }
    }
}

impl Error for NoteValidationError {}

impl Note {
    /// Creates a note with a generated id and both timestamps set to `now`.
    pub fn new(
        user_id: impl Into<UserId>,
        title: impl Into<String>,
        content: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self::with_id(Uuid::new_v4(), user_id, title, content, now)
    }

    /// Creates a note with a caller-provided id.
    pub fn with_id(
        id: NoteId,
        user_id: impl Into<UserId>,
        title: impl Into<String>,
        content: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id: user_id.into(),
            title: title.into(),
            content,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the note was modified after creation.
    pub fn is_edited(&self) -> bool {
        self.updated_at != self.created_at
    }

    /// Moves `updated_at` forward to `now`, never below `created_at`.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now.max(self.created_at);
    }

    /// Checks write-time invariants.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        if self.user_id.trim().is_empty() {
            return Err(NoteValidationError::BlankOwner);
        }
        if self.updated_at < self.created_at {
            return Err(NoteValidationError::UpdatedBeforeCreated {
                created_at: self.created_at,
                updated_at: self.updated_at,
            });
        }
        Ok(())
    }
}
