use super::{current_user, with_note_service};
use crate::error::ApiError;
use crate::state::AppState;
use actix_web::{web, HttpRequest, HttpResponse};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/debug").route(web::get().to(debug_dump)));
}

async fn debug_dump(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let user = current_user(&state, &req)?;
    let note_count = match &user {
        Some(user) => Some(with_note_service(&state, |notes| {
            Ok(notes.count_notes(&user.id)?)
        })?),
        None => None,
    };

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "version": notepad_core::core_version(),
        "user": user,
        "noteCount": note_count,
        "displayOffset": state.display_offset.to_string(),
    })))
}
