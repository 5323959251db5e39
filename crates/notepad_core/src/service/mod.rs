//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository and collaborator calls into use-case level APIs.
//! - Keep HTTP/CLI layers decoupled from storage and AI client details.

pub mod chat_service;
pub mod note_service;
