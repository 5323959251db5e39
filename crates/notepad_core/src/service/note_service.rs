//! Note use-case service.
//!
//! # Responsibility
//! - Provide owner-scoped create/update/get/list/delete APIs.
//! - Normalize titles and stamp creation/modification times.
//! - Page list results for the note list view.
//!
//! # Invariants
//! - `update_note` uses full replacement semantics for title and content.
//! - `updated_at` never moves below `created_at`.
//! - Foreign notes are reported as not found, never as forbidden.

use crate::clock::{Clock, SystemClock};
use crate::model::note::{Note, NoteId};
use crate::repo::note_repo::{NoteListQuery, NoteRepository};
use crate::repo::{RepoError, RepoResult};
use crate::routing::NoteListParams;
use crate::summary::{summarize_note, NoteSummary};
use chrono::FixedOffset;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Notes shown per list page.
pub const NOTES_PAGE_SIZE: u32 = 10;
/// Maximum title length in characters.
pub const TITLE_MAX_CHARS: usize = 200;

/// Service error for note use-cases.
#[derive(Debug)]
pub enum NoteServiceError {
    /// Title exceeds [`TITLE_MAX_CHARS`].
    InvalidTitle(String),
    /// Target note does not exist for this owner.
    NoteNotFound(NoteId),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTitle(reason) => write!(f, "invalid title: {reason}"),
            Self::NoteNotFound(note_id) => write!(f, "note not found: {note_id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent note state: {details}"),
        }
    }
}

impl Error for NoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for NoteServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(note_id) => Self::NoteNotFound(note_id),
            other => Self::Repo(other),
        }
    }
}

/// One page of a user's notes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesPage {
    /// Notes in the requested order.
    pub items: Vec<Note>,
    /// Effective view parameters.
    pub params: NoteListParams,
    pub page_size: u32,
    pub total_items: u64,
    /// At least 1, even for an empty list.
    pub total_pages: u32,
}

impl NotesPage {
    /// Card summaries for every item, rendered in `offset` local time.
    pub fn summaries(&self, offset: FixedOffset) -> Vec<NoteSummary> {
        self.items
            .iter()
            .map(|note| summarize_note(note, offset))
            .collect()
    }

    pub fn has_next(&self) -> bool {
        self.params.page < self.total_pages
    }
}

/// Note service facade over repository implementations.
pub struct NoteService<R: NoteRepository, C: Clock = SystemClock> {
    repo: R,
    clock: C,
}

impl<R: NoteRepository> NoteService<R> {
    /// Creates a service using the wall clock.
    pub fn new(repo: R) -> Self {
        Self::with_clock(repo, SystemClock)
    }
}

impl<R: NoteRepository, C: Clock> NoteService<R, C> {
    pub fn with_clock(repo: R, clock: C) -> Self {
        Self { repo, clock }
    }

    /// Creates one note owned by `owner`.
    pub fn create_note(
        &self,
        owner: &str,
        title: &str,
        content: Option<String>,
    ) -> Result<Note, NoteServiceError> {
        let title = normalize_title(title)?;
        let note = Note::new(owner, title, content, self.clock.now());
        let note_id = self.repo.create_note(&note)?;
        info!("event=note_create module=note_service status=ok note_id={note_id}");

        self.repo
            .get_note(owner, note_id)?
            .ok_or(NoteServiceError::InconsistentState(
                "created note not found in read-back",
            ))
    }

    /// Replaces title and content of an owned note.
    pub fn update_note(
        &self,
        owner: &str,
        note_id: NoteId,
        title: &str,
        content: Option<String>,
    ) -> Result<Note, NoteServiceError> {
        let title = normalize_title(title)?;
        let mut note = self
            .repo
            .get_note(owner, note_id)?
            .ok_or(NoteServiceError::NoteNotFound(note_id))?;
        note.title = title;
        note.content = content;
        note.touch(self.clock.now());
        self.repo.update_note(&note)?;
        info!("event=note_update module=note_service status=ok note_id={note_id}");

        self.repo
            .get_note(owner, note_id)?
            .ok_or(NoteServiceError::InconsistentState(
                "updated note not found in read-back",
            ))
    }

    /// Gets one owned note by id.
    pub fn get_note(&self, owner: &str, note_id: NoteId) -> RepoResult<Option<Note>> {
        self.repo.get_note(owner, note_id)
    }

    /// Deletes one owned note.
    pub fn delete_note(&self, owner: &str, note_id: NoteId) -> Result<(), NoteServiceError> {
        self.repo.delete_note(owner, note_id)?;
        info!("event=note_delete module=note_service status=ok note_id={note_id}");
        Ok(())
    }

    /// Lists one page of the owner's notes.
    pub fn list_notes(
        &self,
        owner: &str,
        params: NoteListParams,
    ) -> Result<NotesPage, NoteServiceError> {
        let total_items = self.repo.count_notes(owner)?;
        let query = NoteListQuery {
            user_id: owner.to_string(),
            sort: params.sort,
            limit: Some(NOTES_PAGE_SIZE),
            offset: params.offset(NOTES_PAGE_SIZE),
        };
        let items = self.repo.list_notes(&query)?;

        Ok(NotesPage {
            items,
            params,
            page_size: NOTES_PAGE_SIZE,
            total_items,
            total_pages: total_pages(total_items, NOTES_PAGE_SIZE),
        })
    }

    /// Counts the owner's notes.
    pub fn count_notes(&self, owner: &str) -> RepoResult<u64> {
        self.repo.count_notes(owner)
    }
}

/// Trims a title and enforces the length limit.
pub fn normalize_title(title: &str) -> Result<String, NoteServiceError> {
    let trimmed = title.trim();
    let length = trimmed.chars().count();
    if length > TITLE_MAX_CHARS {
        return Err(NoteServiceError::InvalidTitle(format!(
            "{length} characters exceeds the {TITLE_MAX_CHARS} character limit"
        )));
    }
    Ok(trimmed.to_string())
}

fn total_pages(total_items: u64, page_size: u32) -> u32 {
    let page_size = u64::from(page_size.max(1));
    let pages = total_items.div_ceil(page_size).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}
