//! Request DTOs for the proxy HTTP API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

/// Request body for the save operation (PUT /data/:id)
#[derive(Debug, Clone, Deserialize)]
pub struct SaveRequest {
    /// The payload to persist
    pub data: String,
}
