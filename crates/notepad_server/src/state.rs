//! Shared application state.

use chrono::FixedOffset;
use notepad_core::{
    ChatService, Clock, RepoError, SessionRepository, SqliteSessionRepository, SystemClock,
    TextGenerator,
};
use parking_lot::Mutex;
use rusqlite::Connection;
use std::sync::Arc;

pub type SharedGenerator = Arc<dyn TextGenerator>;

pub struct AppState {
    /// Single SQLite connection. Never hold the guard across an `.await`.
    pub db: Mutex<Connection>,
    pub chat: ChatService<SharedGenerator>,
    /// Zone used for note date labels.
    pub display_offset: FixedOffset,
}

impl AppState {
    pub fn new(conn: Connection, generator: SharedGenerator, display_offset: FixedOffset) -> Self {
        Self {
            db: Mutex::new(conn),
            chat: ChatService::new(generator),
            display_offset,
        }
    }

    /// Deletes sessions that expired before now. Run once at startup.
    pub fn purge_expired_sessions(&self) -> Result<usize, RepoError> {
        let conn = self.db.lock();
        let sessions = SqliteSessionRepository::try_new(&conn)?;
        let removed = sessions.purge_expired(SystemClock.now())?;
        log::info!("event=session_purge module=server status=ok removed={}", removed);
        Ok(removed)
    }
}
