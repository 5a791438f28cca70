//! Kultura Server - Cultural Center Content Management System
//!
//! A Rust REST API server for managing museum halls, media assets and
//! event registrations.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kultura_server::{api, config::AppConfig, services::Services, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("kultura_server={},tower_http=debug", config.logging.level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Kultura Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create services
    let services = Services::new(config.email.clone(), &config.storage);

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        pool,
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Applications (before /events/:id so the literal path wins)
        .route("/events/applications/:id", get(api::applications::get_application))
        .route("/events/applications/:id", put(api::applications::update_application))
        .route("/events/applications/:id", delete(api::applications::delete_application))
        // Events
        .route("/events", get(api::events::list_events))
        .route("/events", post(api::events::create_event))
        .route("/events/:id", get(api::events::get_event))
        .route("/events/:id", put(api::events::update_event))
        .route("/events/:id", delete(api::events::delete_event))
        .route("/events/:id/image/upload", put(api::events::upload_event_image))
        .route("/events/:id/applications", get(api::events::list_event_applications))
        .route("/events/:id/applications", post(api::events::create_event_application))
        // Media categories (before /media/:id so the literal path wins)
        .route("/media/categories", get(api::media_categories::list_categories))
        .route("/media/categories", post(api::media_categories::create_category))
        .route("/media/categories/:id", get(api::media_categories::get_category))
        .route("/media/categories/:id", put(api::media_categories::update_category))
        .route("/media/categories/:id", delete(api::media_categories::delete_category))
        .route(
            "/media/categories/:id/media/:media_id",
            post(api::media_categories::add_media_to_category),
        )
        .route(
            "/media/categories/:id/media/:media_id",
            delete(api::media_categories::remove_media_from_category),
        )
        // Media photos
        .route("/media/photos/:id", delete(api::media::delete_media_photo))
        // Media
        .route("/media", get(api::media::list_media))
        .route("/media", post(api::media::create_media))
        .route("/media/:id", get(api::media::get_media))
        .route("/media/:id", put(api::media::update_media))
        .route("/media/:id", delete(api::media::delete_media))
        .route("/media/:id/image/upload", put(api::media::upload_media_image))
        .route("/media/:id/file/upload", put(api::media::upload_media_file))
        .route("/media/:id/photos", post(api::media::create_media_photo))
        // Museum halls
        .route("/museum/halls", get(api::museum_halls::list_halls))
        .route("/museum/halls", post(api::museum_halls::create_hall))
        .route("/museum/halls/:id", get(api::museum_halls::get_hall))
        .route("/museum/halls/:id", put(api::museum_halls::update_hall))
        .route("/museum/halls/:id", delete(api::museum_halls::delete_hall))
        .route("/museum/halls/:id/image/upload", put(api::museum_halls::upload_hall_image))
        .route("/museum/halls/:id/sections", get(api::museum_halls::list_hall_sections))
        .route("/museum/halls/:id/sections", post(api::museum_halls::create_hall_section))
        // Museum sections
        .route("/museum/sections/:id", get(api::museum_sections::get_section))
        .route("/museum/sections/:id", put(api::museum_sections::update_section))
        .route("/museum/sections/:id", delete(api::museum_sections::delete_section))
        .route(
            "/museum/sections/:id/image/upload",
            put(api::museum_sections::upload_section_image),
        )
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
