//! HTTP surface for Notepad.
//!
//! # Responsibility
//! - Map JSON requests onto `notepad_core` services.
//! - Resolve callers from bearer tokens or the session cookie.
//!
//! # Invariants
//! - Every error response is a JSON `{ "error": ... }` body.
//! - The database guard is never held across an `.await`.

pub mod ai_client;
pub mod config;
pub mod controllers;
pub mod error;
pub mod state;

pub use state::{AppState, SharedGenerator};

use actix_web::web;
use error::ApiError;

/// Registers every route plus JSON error handlers for the body, query and
/// path extractors.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        ApiError::BadRequest(format!("Invalid JSON body: {err}")).into()
    }));
    cfg.app_data(web::QueryConfig::default().error_handler(|err, _req| {
        ApiError::BadRequest(format!("Invalid query string: {err}")).into()
    }));
    cfg.app_data(web::PathConfig::default().error_handler(|err, _req| {
        ApiError::BadRequest(format!("Invalid path: {err}")).into()
    }));
    controllers::pages::config_routes(cfg);
    controllers::health::config_routes(cfg);
    controllers::auth::config_routes(cfg);
    controllers::notes::config_routes(cfg);
    controllers::chat::config_routes(cfg);
    controllers::debug::config_routes(cfg);
}
