//! Session endpoints. Sessions are issued out of band (see the CLI).

use super::{current_user, request_token, require_user, SESSION_COOKIE};
use crate::error::ApiError;
use crate::state::AppState;
use actix_web::cookie::Cookie;
use actix_web::{web, HttpRequest, HttpResponse};
use notepad_core::{SessionRepository, SqliteSessionRepository};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/auth/me").route(web::get().to(me)));
    cfg.service(web::resource("/api/auth/logout").route(web::post().to(logout)));
}

async fn me(state: web::Data<AppState>, req: HttpRequest) -> Result<HttpResponse, ApiError> {
    let user = require_user(&state, &req)?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "user": user })))
}

/// Ends the presented session. Idempotent for anonymous callers.
async fn logout(state: web::Data<AppState>, req: HttpRequest) -> Result<HttpResponse, ApiError> {
    if current_user(&state, &req)?.is_some() {
        if let Some(token) = request_token(&req) {
            let conn = state.db.lock();
            let deleted = SqliteSessionRepository::try_new(&conn)?.delete_session(&token)?;
            log::info!("event=session_logout module=server status=ok deleted={}", deleted);
        }
    }

    let mut cookie = Cookie::new(SESSION_COOKIE, "");
    cookie.set_path("/");
    cookie.make_removal();
    Ok(HttpResponse::NoContent().cookie(cookie).finish())
}
