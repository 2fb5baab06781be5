//! Data Proxy - a caching front for a slow backing data service
//!
//! Read-through caching, invalidate-before-write, a pluggable write policy
//! and an auditable access log, with a small HTTP surface for demos.

pub mod api;
pub mod backend;
pub mod config;
pub mod error;
pub mod models;
pub mod proxy;

pub use api::AppState;
pub use backend::{DataService, SimulatedDataService};
pub use config::Config;
pub use error::{BackendError, ProxyError};
pub use proxy::DataServiceProxy;
