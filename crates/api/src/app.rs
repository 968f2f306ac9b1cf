use axum::{middleware, routing::get, Router};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{metrics_handler, metrics_middleware, trace_id};
use crate::routes::{dashboard, health, ingest, recent};
use crate::services::ImageStore;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub image_store: ImageStore,
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    let config = Arc::new(config);

    let state = AppState {
        pool,
        image_store: ImageStore::new(&config.storage.upload_dir),
        config: config.clone(),
    };

    // Build CORS layer based on configuration; devices and the dashboard
    // default to same-host deployments, so empty means allow any origin.
    let cors = if config.security.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Ingestion and query routes; auth is the api_key parameter checked
    // inside each ingestion handler
    let api_routes = Router::new()
        .route("/api/v1/ingest/air", get(ingest::ingest_air))
        .route("/api/v1/ingest/flame", get(ingest::ingest_flame))
        .route(
            "/api/v1/ingest/image",
            get(ingest::ingest_image).post(ingest::ingest_image_form),
        )
        .route("/api/v1/recent", get(recent::recent_rows));

    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/", get(dashboard::dashboard))
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    // Merge all routes
    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state)
}
