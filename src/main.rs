//! Main entry point for the Trip Finder service.
//! Sets up the HTTP server, configures logging, loads the trip store and
//! initializes the service with environment-based configuration.

use std::sync::Arc;
use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use trip_finder::api;
use trip_finder::config::TripFinderConfig;
use trip_finder::service::TripService;
use trip_finder::store::{seed, MemoryTripStore};

/// Main entry point for the Trip Finder service.
///
/// # Server Configuration
/// - Binds to 0.0.0.0 on TRIPFINDER_PORT (default 8080)
/// - Trip endpoints live under /api/trips, health check at /health
/// - CORS allows the configured front-end origin for GET requests
///
/// # Error Handling
/// - Uses env_logger for logging, level set via RUST_LOG
/// - An unreadable seed file aborts start-up with an io::Error
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();

    let config = TripFinderConfig::from_env_or_default();
    log::info!("Starting Trip Finder service with configuration: {:?}", config);

    let store = MemoryTripStore::empty();
    if let Some(path) = config.seed_file.as_deref() {
        let trips = seed::load_trips_from_path(path).map_err(|e| {
            log::error!("Failed to seed trip store: {}", e);
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        store.replace_all(trips);
    } else {
        log::warn!("No seed file configured; starting with an empty trip store");
    }

    let port = config.port;
    let allowed_origin = config.cors_allowed_origin.clone();
    let service = web::Data::new(TripService::new(Arc::new(store), Some(config)));

    log::info!("Starting server on port {}", port);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&allowed_origin)
            .allowed_methods(vec!["GET"])
            .allow_any_header()
            .max_age(3600);

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(service.clone())
            .configure(api::configure)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
