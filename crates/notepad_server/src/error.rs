//! JSON error responses for the HTTP surface.
//!
//! Every variant renders as `{ "error": "<public message>" }`. Internal detail
//! is logged and never sent to the client.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use notepad_core::{AuthError, ChatError, NoteServiceError, RepoError};
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized,
    NotFound(&'static str),
    Internal {
        public: &'static str,
        detail: String,
    },
}

impl ApiError {
    pub fn internal(detail: impl Display) -> Self {
        Self::Internal {
            public: "Internal server error",
            detail: detail.to_string(),
        }
    }

    pub fn public_message(&self) -> &str {
        match self {
            Self::BadRequest(message) => message,
            Self::Unauthorized => "Unauthorized",
            Self::NotFound(what) => what,
            Self::Internal { public, .. } => public,
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Internal { detail, .. } => write!(f, "internal error: {detail}"),
            other => f.write_str(other.public_message()),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let Self::Internal { detail, .. } = self {
            log::error!("event=api_error module=server status=error detail={}", detail);
        }
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.public_message()
        }))
    }
}

impl From<RepoError> for ApiError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(_) => Self::NotFound("Note not found"),
            other => Self::internal(other),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(value: AuthError) -> Self {
        match value {
            AuthError::Unauthenticated => Self::Unauthorized,
            AuthError::Repo(err) => Self::internal(err),
        }
    }
}

impl From<NoteServiceError> for ApiError {
    fn from(value: NoteServiceError) -> Self {
        match value {
            NoteServiceError::InvalidTitle(reason) => {
                Self::BadRequest(format!("Invalid title: {reason}"))
            }
            NoteServiceError::NoteNotFound(_) => Self::NotFound("Note not found"),
            other => Self::internal(other),
        }
    }
}

impl From<ChatError> for ApiError {
    fn from(value: ChatError) -> Self {
        match value {
            ChatError::Validation(message) => Self::BadRequest(message.to_string()),
            ChatError::Auth => Self::Unauthorized,
            ChatError::Upstream(ref err) => Self::Internal {
                public: value.public_message(),
                detail: err.to_string(),
            },
        }
    }
}
