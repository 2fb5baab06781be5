//! Configuration Module
//!
//! Handles loading proxy and demo server configuration from environment variables.

use std::env;
use std::time::Duration;

/// Proxy and server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Longest payload (in characters) the default write policy accepts
    pub max_payload_len: usize,
    /// Simulated backing service latency for reads, in milliseconds
    pub fetch_latency_ms: u64,
    /// Simulated backing service latency for writes, in milliseconds
    pub store_latency_ms: u64,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_PAYLOAD_LEN` - Maximum payload length for writes (default: 100)
    /// - `FETCH_LATENCY_MS` - Backing service read latency (default: 1000)
    /// - `STORE_LATENCY_MS` - Backing service write latency (default: 800)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_payload_len: parse_var("MAX_PAYLOAD_LEN").unwrap_or(defaults.max_payload_len),
            fetch_latency_ms: parse_var("FETCH_LATENCY_MS").unwrap_or(defaults.fetch_latency_ms),
            store_latency_ms: parse_var("STORE_LATENCY_MS").unwrap_or(defaults.store_latency_ms),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
        }
    }

    pub fn fetch_latency(&self) -> Duration {
        Duration::from_millis(self.fetch_latency_ms)
    }

    pub fn store_latency(&self) -> Duration {
        Duration::from_millis(self.store_latency_ms)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_payload_len: 100,
            fetch_latency_ms: 1000,
            store_latency_ms: 800,
            server_port: 3000,
        }
    }
}
