pub mod auth;
pub mod chat;
pub mod debug;
pub mod health;
pub mod notes;
pub mod pages;

use crate::error::ApiError;
use crate::state::AppState;
use actix_web::HttpRequest;
use notepad_core::{
    AuthUser, IdentityProvider, NoteService, SessionIdentityProvider, SqliteNoteRepository,
    SqliteSessionRepository, SystemClock,
};

/// Cookie carrying the session token for browser callers.
pub const SESSION_COOKIE: &str = "session";

/// Session token from `Authorization: Bearer` or the session cookie.
pub(crate) fn request_token(req: &HttpRequest) -> Option<String> {
    let bearer = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    bearer.or_else(|| {
        req.cookie(SESSION_COOKIE)
            .map(|cookie| cookie.value().trim().to_string())
            .filter(|value| !value.is_empty())
    })
}

/// Resolves the caller. Locks the database for the lookup only.
pub(crate) fn current_user(
    state: &AppState,
    req: &HttpRequest,
) -> Result<Option<AuthUser>, ApiError> {
    let token = request_token(req);
    if token.is_none() {
        return Ok(None);
    }

    let conn = state.db.lock();
    let sessions = SqliteSessionRepository::try_new(&conn)?;
    let provider = SessionIdentityProvider::new(sessions, SystemClock);
    Ok(provider.current_user(token.as_deref())?)
}

pub(crate) fn require_user(state: &AppState, req: &HttpRequest) -> Result<AuthUser, ApiError> {
    current_user(state, req)?.ok_or(ApiError::Unauthorized)
}

/// Runs `f` against a note service bound to the locked connection.
pub(crate) fn with_note_service<T>(
    state: &AppState,
    f: impl FnOnce(&NoteService<SqliteNoteRepository<'_>>) -> Result<T, ApiError>,
) -> Result<T, ApiError> {
    let conn = state.db.lock();
    let service = NoteService::new(SqliteNoteRepository::try_new(&conn)?);
    f(&service)
}
