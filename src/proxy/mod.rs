//! Proxy Module
//!
//! Caching and access-control layer in front of the backing data service.

mod flight;
mod log;
mod policy;
mod service;
mod stats;


// Re-export public types
pub use flight::{KeyGuard, KeyLocks};
pub use log::{AccessEvent, AccessLog, AccessLogEntry};
pub use policy::{MaxPayloadSize, PolicyDecision, WritePolicy};
pub use service::DataServiceProxy;
pub use stats::ProxyStats;
