//! Request and Response models for the proxy HTTP API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::SaveRequest;
pub use responses::{
    ClearResponse, GetResponse, HealthResponse, LogEntryResponse, LogResponse, SaveResponse,
    StatsResponse,
};
