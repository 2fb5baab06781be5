//! Response DTOs for the proxy HTTP API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::proxy::{AccessLogEntry, ProxyStats};

/// Response body for the read operation (GET /data/:id)
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    /// The requested key
    pub key: String,
    /// The current value
    pub value: String,
}

impl GetResponse {
    /// Creates a new GetResponse
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Response body for the save operation (PUT /data/:id)
#[derive(Debug, Clone, Serialize)]
pub struct SaveResponse {
    /// Success message
    pub message: String,
    /// The key that was saved
    pub key: String,
}

impl SaveResponse {
    /// Creates a new SaveResponse
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' saved successfully", key),
            key,
        }
    }
}

/// Response body for the clear endpoints (DELETE /cache, DELETE /log)
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    pub message: String,
}

impl ClearResponse {
    pub fn new(what: &str) -> Self {
        Self {
            message: format!("{} cleared", what),
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of read requests
    pub request_count: u64,
    /// Number of reads served from cache
    pub cache_hits: u64,
    /// Hit rate as a whole percentage
    pub hit_rate: u32,
    /// Current number of cached records
    pub cache_size: usize,
}

impl From<ProxyStats> for StatsResponse {
    fn from(stats: ProxyStats) -> Self {
        Self {
            hit_rate: stats.hit_rate,
            request_count: stats.request_count,
            cache_hits: stats.cache_hits,
            cache_size: stats.cache_size,
        }
    }
}

/// One access log line, with its rendered message
#[derive(Debug, Clone, Serialize)]
pub struct LogEntryResponse {
    #[serde(flatten)]
    pub entry: AccessLogEntry,
    pub message: String,
}

impl From<AccessLogEntry> for LogEntryResponse {
    fn from(entry: AccessLogEntry) -> Self {
        Self {
            message: entry.event.to_string(),
            entry,
        }
    }
}

/// Response body for the log endpoint (GET /log)
#[derive(Debug, Clone, Serialize)]
pub struct LogResponse {
    pub entries: Vec<LogEntryResponse>,
}

impl LogResponse {
    pub fn new(entries: Vec<AccessLogEntry>) -> Self {
        Self {
            entries: entries.into_iter().map(LogEntryResponse::from).collect(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
