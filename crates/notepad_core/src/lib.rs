//! Core domain logic for Notepad.
//! This crate is the single source of truth for note invariants and the
//! note card formatting rules.

pub mod auth;
pub mod clock;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod routing;
pub mod service;
pub mod summary;

pub use auth::{AuthError, AuthUser, IdentityProvider, SessionIdentityProvider};
pub use clock::{Clock, FixedClock, SystemClock};
pub use logging::{
    default_log_level, init_logging, logging_status, LogTarget, LoggingConfig, LoggingError,
};
pub use model::note::{Note, NoteContent, NoteId, NoteValidationError, UserId};
pub use repo::note_repo::{NoteListQuery, NoteRepository, SqliteNoteRepository};
pub use repo::session_repo::{Session, SessionRepository, SqliteSessionRepository};
pub use repo::{RepoError, RepoResult};
pub use routing::{parse_page, NoteListParams, NoteSortKey, ParseSortKeyError};
pub use service::chat_service::{
    ChatError, ChatReply, ChatRequest, ChatService, GenerateError, TextGenerator,
};
pub use service::note_service::{NoteService, NoteServiceError, NotesPage, NOTES_PAGE_SIZE};
pub use summary::{
    format_preview, format_timestamps, summarize_note, utc_offset, NoteSummary, TimestampLabels,
    EMPTY_CONTENT_FALLBACK, PREVIEW_MAX_CHARS,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
