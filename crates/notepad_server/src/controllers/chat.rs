use super::current_user;
use crate::error::ApiError;
use crate::state::AppState;
use actix_web::{web, HttpRequest, HttpResponse};
use notepad_core::ChatRequest;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/chat").route(web::post().to(chat)));
}

/// Body is taken as raw bytes so malformed JSON is reported like a missing field.
async fn chat(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    let request: ChatRequest = serde_json::from_slice(&body).unwrap_or_default();
    // Resolved before the await; the DB guard is released here.
    let caller = current_user(&state, &req)?;

    let reply = state.chat.respond(caller.as_ref(), &request).await?;
    Ok(HttpResponse::Ok().json(reply))
}
