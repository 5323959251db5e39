use super::current_user;
use crate::error::ApiError;
use crate::state::AppState;
use actix_web::{http::header, web, HttpRequest, HttpResponse};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(index)));
}

/// Sends signed-in callers to the note list and everyone else to login.
async fn index(state: web::Data<AppState>, req: HttpRequest) -> Result<HttpResponse, ApiError> {
    let location = match current_user(&state, &req)? {
        Some(_) => "/notes",
        None => "/login",
    };
    Ok(HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish())
}
