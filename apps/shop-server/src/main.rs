//! # Shop Server
//!
//! Actix-web entry point: dashboard API, public feed and uploaded images.

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

mod config;
mod handlers;
mod middleware;
mod observability;
mod state;
mod telemetry;

use config::AppConfig;
use observability::RequestIdMiddleware;
use state::AppState;
use telemetry::TelemetryConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();

    tracing::info!(
        data_dir = %config.data_dir.display(),
        public_dir = %config.public_dir.display(),
        "Starting shop server on {}:{}",
        config.host,
        config.port
    );

    let state = AppState::new(&config).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to initialize storage");
        std::io::Error::other(e.to_string())
    })?;
    let images_root = config.images_root();

    HttpServer::new(move || {
        App::new()
            .wrap(RequestIdMiddleware)
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(|cfg| handlers::configure_routes(cfg, &state))
            .service(actix_files::Files::new("/images", images_root.clone()))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
