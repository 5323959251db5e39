//! Notes REST API for the note list and editor views.
//!
//! Every route is owner-scoped; a foreign or malformed id is a 404.

use super::{require_user, with_note_service};
use crate::error::ApiError;
use crate::state::AppState;
use actix_web::{web, HttpRequest, HttpResponse};
use notepad_core::{summarize_note, NoteId, NoteListParams};
use serde::Deserialize;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/notes")
            .route(web::get().to(list_notes))
            .route(web::post().to(create_note)),
    );
    cfg.service(
        web::resource("/api/notes/{id}")
            .route(web::get().to(get_note))
            .route(web::put().to(update_note))
            .route(web::delete().to(delete_note)),
    );
}

#[derive(Debug, Deserialize)]
struct ListNotesQuery {
    sort: Option<String>,
    page: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NoteInput {
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: Option<String>,
}

fn parse_note_id(raw: &str) -> Result<NoteId, ApiError> {
    NoteId::parse_str(raw).map_err(|_| ApiError::NotFound("Note not found"))
}

async fn list_notes(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<ListNotesQuery>,
) -> Result<HttpResponse, ApiError> {
    let user = require_user(&state, &req)?;
    let params = NoteListParams::from_query(query.sort.as_deref(), query.page.as_deref());

    let page = with_note_service(&state, |notes| Ok(notes.list_notes(&user.id, params)?))?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "items": page.summaries(state.display_offset),
        "sort": page.params.sort.as_str(),
        "page": page.params.page,
        "pageSize": page.page_size,
        "totalItems": page.total_items,
        "totalPages": page.total_pages,
        "hasNext": page.has_next(),
        "query": page.params.to_query_string(),
    })))
}

async fn create_note(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<NoteInput>,
) -> Result<HttpResponse, ApiError> {
    let user = require_user(&state, &req)?;
    let input = body.into_inner();

    let note = with_note_service(&state, |notes| {
        Ok(notes.create_note(&user.id, &input.title, input.content)?)
    })?;

    let summary = summarize_note(&note, state.display_offset);
    Ok(HttpResponse::Created().json(serde_json::json!({ "note": note, "summary": summary })))
}

async fn get_note(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let user = require_user(&state, &req)?;
    let note_id = parse_note_id(&path)?;

    let note = with_note_service(&state, |notes| Ok(notes.get_note(&user.id, note_id)?))?
        .ok_or(ApiError::NotFound("Note not found"))?;

    let summary = summarize_note(&note, state.display_offset);
    Ok(HttpResponse::Ok().json(serde_json::json!({ "note": note, "summary": summary })))
}

async fn update_note(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    body: web::Json<NoteInput>,
) -> Result<HttpResponse, ApiError> {
    let user = require_user(&state, &req)?;
    let note_id = parse_note_id(&path)?;
    let input = body.into_inner();

    let note = with_note_service(&state, |notes| {
        Ok(notes.update_note(&user.id, note_id, &input.title, input.content)?)
    })?;

    let summary = summarize_note(&note, state.display_offset);
    Ok(HttpResponse::Ok().json(serde_json::json!({ "note": note, "summary": summary })))
}

async fn delete_note(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let user = require_user(&state, &req)?;
    let note_id = parse_note_id(&path)?;

    with_note_service(&state, |notes| Ok(notes.delete_note(&user.id, note_id)?))?;

    Ok(HttpResponse::NoContent().finish())
}
