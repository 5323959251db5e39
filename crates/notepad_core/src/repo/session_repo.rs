//! Auth session persistence.
//!
//! # Responsibility
//! - Issue opaque bearer tokens bound to a user id.
//! - Resolve tokens while unexpired and slide their expiry forward.
//!
//! # Invariants
//! - A token is valid only while `expires_at > now`.
//! - Successful validation moves `expires_at` to `now + lifetime`.

use crate::model::note::UserId;
use crate::repo::{ensure_table_ready, from_epoch_ms, to_epoch_ms, RepoError, RepoResult};
use chrono::{DateTime, Duration, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

/// Default session lifetime.
pub const SESSION_LIFETIME_HOURS: i64 = 24;

const SESSION_COLUMNS: &[&str] = &["token", "user_id", "created_at", "expires_at"];

/// One issued login session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Repository interface for session storage.
pub trait SessionRepository {
    /// Issues a new session for `user_id`.
    fn create_session(&self, user_id: &str, now: DateTime<Utc>) -> RepoResult<Session>;
    /// Resolves an unexpired session and extends its expiry.
    fn validate_session(&self, token: &str, now: DateTime<Utc>) -> RepoResult<Option<Session>>;
    /// Removes a session. Returns whether a row was deleted.
    fn delete_session(&self, token: &str) -> RepoResult<bool>;
    /// Removes all sessions expired at `now`. Returns the number removed.
    fn purge_expired(&self, now: DateTime<Utc>) -> RepoResult<usize>;
}

/// SQLite-backed session repository.
pub struct SqliteSessionRepository<'conn> {
    conn: &'conn Connection,
    lifetime: Duration,
}

impl<'conn> SqliteSessionRepository<'conn> {
    /// Constructs a repository with the default 24 hour lifetime.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        Self::with_lifetime(conn, Duration::hours(SESSION_LIFETIME_HOURS))
    }

    pub fn with_lifetime(conn: &'conn Connection, lifetime: Duration) -> RepoResult<Self> {
        ensure_table_ready(conn, "auth_sessions", SESSION_COLUMNS)?;
        Ok(Self { conn, lifetime })
    }
}

impl SessionRepository for SqliteSessionRepository<'_> {
    fn create_session(&self, user_id: &str, now: DateTime<Utc>) -> RepoResult<Session> {
        let user_id = user_id.trim();
        if user_id.is_empty() {
            return Err(RepoError::InvalidData(
                "session user id must not be blank".to_string(),
            ));
        }

        let session = Session {
            token: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            created_at: now,
            expires_at: now + self.lifetime,
        };

        self.conn.execute(
            "INSERT INTO auth_sessions (token, user_id, created_at, expires_at)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                session.token.as_str(),
                session.user_id.as_str(),
                to_epoch_ms(session.created_at),
                to_epoch_ms(session.expires_at),
            ],
        )?;

        Ok(session)
    }

    fn validate_session(&self, token: &str, now: DateTime<Utc>) -> RepoResult<Option<Session>> {
        let row = self
            .conn
            .query_row(
                "SELECT token, user_id, created_at
                 FROM auth_sessions
                 WHERE token = ?1
                   AND expires_at > ?2;",
                params![token, to_epoch_ms(now)],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, i64>(2)?,
                    ))
                },
            )
            .optional()?;

        let Some((token, user_id, created_at)) = row else {
            return Ok(None);
        };

        let expires_at = now + self.lifetime;
        self.conn.execute(
            "UPDATE auth_sessions SET expires_at = ?1 WHERE token = ?2;",
            params![to_epoch_ms(expires_at), token.as_str()],
        )?;

        Ok(Some(Session {
            token,
            user_id,
            created_at: from_epoch_ms(created_at, "auth_sessions.created_at")?,
            expires_at,
        }))
    }

    fn delete_session(&self, token: &str) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM auth_sessions WHERE token = ?1;", [token])?;
        Ok(changed > 0)
    }

    fn purge_expired(&self, now: DateTime<Utc>) -> RepoResult<usize> {
        let removed = self.conn.execute(
            "DELETE FROM auth_sessions WHERE expires_at <= ?1;",
            [to_epoch_ms(now)],
        )?;
        Ok(removed)
    }
}
