mod api;
mod config;
mod database;
mod middleware;
mod models;
mod services;
mod utils;

use std::io;
use std::sync::Arc;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::AppConfig;
use crate::database::{DbHandle, MongoDB};
use crate::utils::AppError;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    log_panics();

    let config = AppConfig::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;

    log::info!("🚀 Starting media auth server...");
    log::info!("📁 Uploads: {}", config.upload_dir().display());
    log::info!("🎞️  VODs: {}", config.vod_dir().display());

    let db = DbHandle::new();

    let config_data = web::Data::new(config.clone());
    let db_data = web::Data::new(db.clone());
    let public_dir = config.public_dir.clone();
    let vod_dir = config.vod_dir();

    let server = HttpServer::new(move || {
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(config_data.clone())
            .app_data(db_data.clone())
            .wrap(middleware::CatchPanic)
            .wrap(Cors::permissive())
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi)
            )
            .configure(api::configure)
            .service(Files::new("/public", &public_dir))
            .service(Files::new("/VODs", &vod_dir))
            .default_service(web::to(api::fallback::not_found))
    })
    .bind(config.bind_address())?
    .run();

    log::info!("🌐 Server is listening on {}", config.bind_address());

    // The listener is already up; requests see an empty handle until this finishes.
    let connect = async {
        connect_database(&config, &db)
            .await
            .map_err(|e| {
                log::error!("❌ Failed to connect to MongoDB: {}", e);
                io::Error::new(io::ErrorKind::ConnectionRefused, e.to_string())
            })
    };

    futures::future::try_join(server, connect).await?;

    Ok(())
}

async fn connect_database(config: &AppConfig, db: &DbHandle) -> Result<(), AppError> {
    log::info!("📊 Connecting to MongoDB at {}", config.database_url);

    let mongodb = MongoDB::new(&config.database_url, &config.database_name).await?;
    db.connect(Arc::new(mongodb))?;

    log::info!("✅ Connected to Mongo database '{}'", config.database_name);
    Ok(())
}

/// Handler panics are logged here; `CatchPanic` answers the request.
fn log_panics() {
    std::panic::set_hook(Box::new(|info| {
        log::error!("uncaught panic: {}", info);
    }));
}
