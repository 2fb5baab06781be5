//! API Routes
//!
//! Configures the Axum router with all proxy endpoints.

use axum::{
    routing::{delete, get},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    clear_cache_handler, clear_log_handler, get_data_handler, health_handler, log_handler,
    save_data_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /data/:id` - Read a record through the cache
/// - `PUT /data/:id` - Write a record through the proxy
/// - `GET /stats` - Request count, hits, hit rate and cache size
/// - `GET /log` - Access log, oldest first
/// - `DELETE /log` - Clear the access log
/// - `DELETE /cache` - Clear the cache
/// - `GET /health` - Health check endpoint
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/data/:id", get(get_data_handler).put(save_data_handler))
        .route("/stats", get(stats_handler))
        .route("/log", get(log_handler).delete(clear_log_handler))
        .route("/cache", delete(clear_cache_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
