//! # Sticky Notes Server
//!
//! The main entry point for the Actix-web HTTP server.

use actix_web::{App, HttpServer, web};
use anyhow::Context;
use tracing_actix_web::TracingLogger;

use sticky_notes::config::AppConfig;
use sticky_notes::handlers;
use sticky_notes::observability::RequestIdMiddleware;
use sticky_notes::state::AppState;
use sticky_notes::telemetry::{self, TelemetryConfig};
use sticky_notes::templates::Templates;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();

    tracing::info!("Starting Sticky Notes on {}:{}", config.host, config.port);

    let templates = Templates::new().context("failed to load templates")?;
    let state = AppState::new(&config, templates).await;

    HttpServer::new(move || {
        App::new()
            .wrap(RequestIdMiddleware)
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))
    .with_context(|| format!("failed to bind {}:{}", config.host, config.port))?
    .run()
    .await?;

    Ok(())
}
