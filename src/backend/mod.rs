//! Backing Service Module
//!
//! The slow data service that the caching proxy sits in front of.

mod simulated;

use async_trait::async_trait;

use crate::error::BackendError;

pub use simulated::SimulatedDataService;

// == Data Service ==
/// Read/write access to records identified by a string key.
///
/// Both operations may be slow and may fail; callers must not assume they
/// complete instantly.
#[async_trait]
pub trait DataService: Send + Sync {
    /// Reads the current value stored under `key`.
    async fn fetch(&self, key: &str) -> Result<String, BackendError>;

    /// Persists `data` under `key`.
    async fn store(&self, key: &str, data: &str) -> Result<(), BackendError>;
}
