use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use notepad_core::db::open_db;
use notepad_core::{init_logging, GenerateError};
use notepad_server::ai_client::OpenAiTextGenerator;
use notepad_server::config::ServerConfig;
use notepad_server::{configure_routes, AppState, SharedGenerator};
use std::io;
use std::sync::Arc;

fn invalid_input(err: impl std::fmt::Display) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, err.to_string())
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();

    let config = ServerConfig::from_env().map_err(invalid_input)?;
    init_logging(&config.logging).map_err(invalid_input)?;

    if config.ai.api_key.is_none() {
        log::warn!("event=config_load module=server status=degraded reason=missing_ai_api_key");
    }

    let conn = open_db(&config.database_path).map_err(io::Error::other)?;
    let generator: SharedGenerator = Arc::new(
        OpenAiTextGenerator::new(config.ai.clone())
            .map_err(|err: GenerateError| io::Error::other(err.to_string()))?,
    );
    let state = web::Data::new(AppState::new(conn, generator, config.display_offset));
    if let Err(err) = state.purge_expired_sessions() {
        log::warn!("event=session_purge module=server status=error error={}", err);
    }

    log::info!(
        "event=server_start module=server status=ok host={} port={} db={}",
        config.host,
        config.port,
        config.database_path.display()
    );

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .configure(configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
