//! Identity resolution for page- and API-level callers.
//!
//! # Responsibility
//! - Turn an optional bearer token into "current user or none".
//! - Provide the "require authenticated user" gate.
//!
//! # Invariants
//! - Blank or missing tokens resolve to no user without touching storage.
//! - Tokens are never logged.

use crate::clock::Clock;
use crate::model::note::UserId;
use crate::repo::session_repo::SessionRepository;
use crate::repo::RepoError;
use log::debug;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthUser {
    pub id: UserId,
}

#[derive(Debug)]
pub enum AuthError {
    /// No valid session was presented.
    Unauthenticated,
    /// Session storage failed.
    Repo(RepoError),
}

impl Display for AuthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthenticated => write!(f, "authentication required"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AuthError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Unauthenticated => None,
        }
    }
}

impl From<RepoError> for AuthError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Resolves callers from presented credentials.
pub trait IdentityProvider {
    /// Returns the current user, or `None` for anonymous callers.
    fn current_user(&self, token: Option<&str>) -> Result<Option<AuthUser>, AuthError>;

    /// Like [`IdentityProvider::current_user`] but anonymous callers fail.
    fn require_user(&self, token: Option<&str>) -> Result<AuthUser, AuthError> {
        self.current_user(token)?.ok_or(AuthError::Unauthenticated)
    }
}

/// Identity provider backed by stored sessions.
pub struct SessionIdentityProvider<R: SessionRepository, C: Clock> {
    sessions: R,
    clock: C,
}

impl<R: SessionRepository, C: Clock> SessionIdentityProvider<R, C> {
    pub fn new(sessions: R, clock: C) -> Self {
        Self { sessions, clock }
    }
}

impl<R: SessionRepository, C: Clock> IdentityProvider for SessionIdentityProvider<R, C> {
    fn current_user(&self, token: Option<&str>) -> Result<Option<AuthUser>, AuthError> {
        let Some(token) = token.map(str::trim).filter(|value| !value.is_empty()) else {
            return Ok(None);
        };

        let session = self.sessions.validate_session(token, self.clock.now())?;
        if session.is_none() {
            debug!("event=session_resolve module=auth status=miss");
        }
        Ok(session.map(|session| AuthUser {
            id: session.user_id,
        }))
    }
}
