//! Simulated Backing Service
//!
//! In-memory stand-in for a remote data service with configurable latency.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::DataService;
use crate::config::Config;
use crate::error::BackendError;

// == Simulated Data Service ==
/// Data service that sleeps before answering, like a remote API would.
///
/// Written records are kept so a later fetch returns them. Unknown keys get a
/// generated value.
#[derive(Debug, Default)]
pub struct SimulatedDataService {
    /// Records written through `store`
    records: RwLock<HashMap<String, String>>,
    /// Delay applied before every fetch
    fetch_latency: Duration,
    /// Delay applied before every store
    store_latency: Duration,
    /// When set, every call fails with `Unavailable`
    offline: AtomicBool,
    fetch_calls: AtomicU64,
    store_calls: AtomicU64,
}

impl SimulatedDataService {
    // == Constructor ==
    /// Creates a service with the given read and write latencies.
    pub fn new(fetch_latency: Duration, store_latency: Duration) -> Self {
        Self {
            fetch_latency,
            store_latency,
            ..Self::default()
        }
    }

    /// Creates a service using the latencies from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.fetch_latency(), config.store_latency())
    }

    /// Creates a service that answers immediately.
    pub fn instant() -> Self {
        Self::default()
    }

    // == Failure Injection ==
    /// Switches the service offline (every call fails) or back online.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    // == Call Counters ==
    /// Number of fetch calls received, including failed ones.
    pub fn fetch_calls(&self) -> u64 {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    /// Number of store calls received, including failed ones.
    pub fn store_calls(&self) -> u64 {
        self.store_calls.load(Ordering::SeqCst)
    }

    /// Returns the record last written under `key`, bypassing latency.
    pub async fn record(&self, key: &str) -> Option<String> {
        self.records.read().await.get(key).cloned()
    }

    fn check_online(&self) -> Result<(), BackendError> {
        if self.offline.load(Ordering::SeqCst) {
            Err(BackendError::Unavailable(
                "simulated service is offline".to_string(),
            ))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl DataService for SimulatedDataService {
    async fn fetch(&self, key: &str) -> Result<String, BackendError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        info!("Backing service fetch: {}", key);
        tokio::time::sleep(self.fetch_latency).await;
        self.check_online()?;

        let value = self
            .records
            .read()
            .await
            .get(key)
            .cloned()
            .unwrap_or_else(|| format!("data for {}", key));
        Ok(value)
    }

    async fn store(&self, key: &str, data: &str) -> Result<(), BackendError> {
        self.store_calls.fetch_add(1, Ordering::SeqCst);
        info!("Backing service store: {}", key);
        tokio::time::sleep(self.store_latency).await;
        self.check_online()?;

        self.records
            .write()
            .await
            .insert(key.to_string(), data.to_string());
        debug!("Backing service persisted {} bytes for {}", data.len(), key);
        Ok(())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn test_fetch_unknown_key_generates_value() {
        let service = SimulatedDataService::instant();

        let value = service.fetch("user-1").await.unwrap();
        assert_eq!(value, "data for user-1");
        assert_eq!(service.fetch_calls(), 1);
    }

    #[tokio::test]
    async fn test_store_then_fetch_returns_written_value() {
        let service = SimulatedDataService::instant();

        service.store("user-1", "hello").await.unwrap();
        assert_eq!(service.fetch("user-1").await.unwrap(), "hello");
        assert_eq!(service.record("user-1").await.as_deref(), Some("hello"));
        assert_eq!(service.store_calls(), 1);
    }

    #[tokio::test]
    async fn test_offline_fails_every_call() {
        let service = SimulatedDataService::instant();
        service.set_offline(true);

        assert!(matches!(
            service.fetch("k").await,
            Err(BackendError::Unavailable(_))
        ));
        assert!(matches!(
            service.store("k", "v").await,
            Err(BackendError::Unavailable(_))
        ));
        assert!(service.record("k").await.is_none());

        service.set_offline(false);
        assert!(service.fetch("k").await.is_ok());
    }

    #[tokio::test]
    async fn test_latency_is_applied() {
        let service =
            SimulatedDataService::new(Duration::from_millis(50), Duration::from_millis(30));

        let start = Instant::now();
        service.fetch("k").await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(50));

        let start = Instant::now();
        service.store("k", "v").await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(30));
    }
}
