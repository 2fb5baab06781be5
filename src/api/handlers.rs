//! API Handlers
//!
//! HTTP request handlers for each proxy endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use tokio_util::sync::CancellationToken;

use crate::backend::DataService;
use crate::config::Config;
use crate::error::Result;
use crate::models::{
    ClearResponse, GetResponse, HealthResponse, LogResponse, SaveRequest, SaveResponse,
    StatsResponse,
};
use crate::proxy::DataServiceProxy;

/// Application state shared across all handlers.
///
/// In-flight proxy calls observe `shutdown`, so stopping the server cancels them.
#[derive(Clone)]
pub struct AppState {
    /// Shared caching proxy
    pub proxy: Arc<DataServiceProxy>,
    /// Cancelled when the server shuts down
    pub shutdown: CancellationToken,
}

impl AppState {
    /// Creates a new AppState around the given proxy.
    pub fn new(proxy: DataServiceProxy) -> Self {
        Self {
            proxy: Arc::new(proxy),
            shutdown: CancellationToken::new(),
        }
    }

    /// Creates a new AppState from configuration and a backing service.
    pub fn from_config(config: &Config, backend: Arc<dyn DataService>) -> Self {
        Self::new(DataServiceProxy::from_config(backend, config))
    }
}

/// Handler for GET /data/:id
pub async fn get_data_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<GetResponse>> {
    let value = state.proxy.get_data(&id, &state.shutdown).await?;

    Ok(Json(GetResponse::new(id, value)))
}

/// Handler for PUT /data/:id
pub async fn save_data_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<SaveRequest>,
) -> Result<Json<SaveResponse>> {
    state
        .proxy
        .save_data(&id, &req.data, &state.shutdown)
        .await?;

    Ok(Json(SaveResponse::new(id)))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.proxy.stats().await.into())
}

/// Handler for GET /log
pub async fn log_handler(State(state): State<AppState>) -> Json<LogResponse> {
    Json(LogResponse::new(state.proxy.access_log().await))
}

/// Handler for DELETE /log
pub async fn clear_log_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    state.proxy.clear_log().await;
    Json(ClearResponse::new("Access log"))
}

/// Handler for DELETE /cache
pub async fn clear_cache_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    state.proxy.clear_cache().await;
    Json(ClearResponse::new("Cache"))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
