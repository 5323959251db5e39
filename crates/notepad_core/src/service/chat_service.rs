//! AI chat passthrough use-case.
//!
//! # Responsibility
//! - Validate chat requests and bind them to the authenticated caller.
//! - Forward one prompt to a [`TextGenerator`] and stamp the reply.
//! - Map failures onto the 400/401/500 boundary taxonomy.
//!
//! # Invariants
//! - Validation runs before the identity check; neither touches the generator.
//! - Upstream failure detail is logged, never returned to the caller.
//! - Prompt text is not logged.

use crate::auth::AuthUser;
use crate::clock::{Clock, SystemClock};
use async_trait::async_trait;
use chrono::SecondsFormat;
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use std::time::Instant;

/// Failure of the AI text generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    /// Request never produced an HTTP response.
    Transport(String),
    /// Upstream answered with a non-success status.
    Status { status: u16, body: String },
    /// Upstream answered without any text.
    EmptyResponse,
    /// Generator is not configured (e.g. missing API key).
    NotConfigured(&'static str),
}

impl Display for GenerateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(message) => write!(f, "ai transport failure: {message}"),
            Self::Status { status, body } => {
                write!(f, "ai upstream returned HTTP {status}: {body}")
            }
            Self::EmptyResponse => write!(f, "ai upstream returned no text"),
            Self::NotConfigured(what) => write!(f, "ai client is not configured: {what}"),
        }
    }
}

impl Error for GenerateError {}

/// Single-prompt text generation.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate_text(&self, prompt: &str) -> Result<String, GenerateError>;
}

#[async_trait]
impl<T: TextGenerator + ?Sized> TextGenerator for Arc<T> {
    async fn generate_text(&self, prompt: &str) -> Result<String, GenerateError> {
        (**self).generate_text(prompt).await
    }
}

/// Incoming chat payload. Fields are optional so missing ones can be reported
/// as validation failures instead of deserialization failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Successful chat reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatReply {
    pub response: String,
    /// RFC 3339, millisecond precision, UTC.
    pub timestamp: String,
}

/// Chat failure, already classified for the API boundary.
#[derive(Debug)]
pub enum ChatError {
    /// Required fields are missing or blank.
    Validation(&'static str),
    /// Caller is anonymous or does not match `userId`.
    Auth,
    /// The generator failed.
    Upstream(GenerateError),
}

impl ChatError {
    /// HTTP status used at the API boundary.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::Auth => 401,
            Self::Upstream(_) => 500,
        }
    }

    /// Message safe to return to callers.
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::Validation(message) => *message,
            Self::Auth => "Unauthorized",
            Self::Upstream(_) => "Failed to generate AI response",
        }
    }
}

impl Display for ChatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(message) => write!(f, "invalid chat request: {message}"),
            Self::Auth => write!(f, "chat caller is not authorized"),
            Self::Upstream(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ChatError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Upstream(err) => Some(err),
            _ => None,
        }
    }
}

/// Chat passthrough service.
pub struct ChatService<G: TextGenerator, C: Clock = SystemClock> {
    generator: G,
    clock: C,
}

impl<G: TextGenerator> ChatService<G> {
    pub fn new(generator: G) -> Self {
        Self::with_clock(generator, SystemClock)
    }
}

impl<G: TextGenerator, C: Clock> ChatService<G, C> {
    pub fn with_clock(generator: G, clock: C) -> Self {
        Self { generator, clock }
    }

    /// Answers one chat message for `caller`.
    pub async fn respond(
        &self,
        caller: Option<&AuthUser>,
        request: &ChatRequest,
    ) -> Result<ChatReply, ChatError> {
        let message = non_blank(request.message.as_deref());
        let user_id = non_blank(request.user_id.as_deref());
        let (Some(message), Some(user_id)) = (message, user_id) else {
            return Err(ChatError::Validation("message and userId are required"));
        };

        match caller {
            Some(caller) if caller.id == user_id => {}
            _ => {
                warn!("event=chat_respond module=chat_service status=denied");
                return Err(ChatError::Auth);
            }
        }

        let started_at = Instant::now();
        let response = self.generator.generate_text(message).await.map_err(|err| {
            error!(
                "event=chat_respond module=chat_service status=error duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            );
            ChatError::Upstream(err)
        })?;
        info!(
            "event=chat_respond module=chat_service status=ok duration_ms={} response_chars={}",
            started_at.elapsed().as_millis(),
            response.chars().count()
        );

        Ok(ChatReply {
            response,
            timestamp: self
                .clock
                .now()
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.trim().is_empty())
}
