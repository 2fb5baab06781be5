//! Error types for the data proxy
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Backend Error Enum ==
/// Failures reported by a backing data service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// The service could not be reached or did not answer
    #[error("Backing service unavailable: {0}")]
    Unavailable(String),

    /// The service answered but refused the operation
    #[error("Backing service rejected '{key}': {reason}")]
    Rejected { key: String, reason: String },
}

// == Proxy Error Enum ==
/// Unified error type for the caching proxy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProxyError {
    /// Record keys must be non-empty
    #[error("Invalid key: key cannot be empty")]
    InvalidKey,

    /// The write policy denied the payload
    #[error("Policy violation: {0}")]
    PolicyViolation(String),

    /// Fetch or store failure from the backing service, passed through as-is
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// The caller cancelled the operation
    #[error("Operation cancelled")]
    Cancelled,
}

// == IntoResponse Implementation ==
impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = match &self {
            ProxyError::InvalidKey => StatusCode::BAD_REQUEST,
            ProxyError::PolicyViolation(_) => StatusCode::FORBIDDEN,
            ProxyError::Backend(_) => StatusCode::BAD_GATEWAY,
            ProxyError::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the proxy.
pub type Result<T> = std::result::Result<T, ProxyError>;
