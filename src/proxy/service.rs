//! Data Service Proxy
//!
//! Read-through cache with invalidate-before-write in front of a [`DataService`].

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::backend::DataService;
use crate::config::Config;
use crate::error::{ProxyError, Result};
use crate::proxy::{
    AccessEvent, AccessLog, AccessLogEntry, KeyLocks, MaxPayloadSize, PolicyDecision, ProxyStats,
    WritePolicy,
};

/// Everything the proxy mutates, guarded together.
#[derive(Debug, Default)]
struct ProxyState {
    cache: HashMap<String, String>,
    stats: ProxyStats,
    log: AccessLog,
}

// == Data Service Proxy ==
/// Caching, policy-checking and auditing front for a slow data service.
///
/// The proxy is shared by reference (typically behind an `Arc`). Calls on the
/// same key are serialized, so two concurrent misses trigger one backend
/// fetch and a write never races a pending fetch of the same key. Calls on
/// different keys run concurrently.
///
/// A read commits its counters and log entries only once it completes, so a
/// cancelled read leaves no trace.
pub struct DataServiceProxy {
    backend: Arc<dyn DataService>,
    policy: Box<dyn WritePolicy>,
    state: RwLock<ProxyState>,
    flights: KeyLocks,
}

impl DataServiceProxy {
    // == Constructor ==
    /// Creates a proxy with the default 100-character write policy.
    pub fn new(backend: Arc<dyn DataService>) -> Self {
        Self {
            backend,
            policy: Box::new(MaxPayloadSize::default()),
            state: RwLock::new(ProxyState::default()),
            flights: KeyLocks::new(),
        }
    }

    /// Creates a proxy whose payload limit comes from configuration.
    pub fn from_config(backend: Arc<dyn DataService>, config: &Config) -> Self {
        Self::new(backend).with_policy(MaxPayloadSize::new(config.max_payload_len))
    }

    /// Replaces the write policy.
    pub fn with_policy(mut self, policy: impl WritePolicy + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    // == Get Data ==
    /// Returns the value for `id`, from cache when present, otherwise from
    /// the backing service (caching the result).
    ///
    /// Backend failures are returned unchanged and nothing is cached.
    pub async fn get_data(&self, id: &str, cancel: &CancellationToken) -> Result<String> {
        validate_key(id)?;
        if cancel.is_cancelled() {
            return Err(cancelled("read", id));
        }

        let _flight = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(cancelled("read", id)),
            guard = self.flights.acquire(id) => guard,
        };

        if let Some(value) = self.serve_cached(id).await {
            return Ok(value);
        }

        debug!("Cache miss, fetching from backing service: {}", id);
        let fetched = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(cancelled("read", id)),
            result = self.backend.fetch(id) => result,
        };

        let mut state = self.state.write().await;
        state.stats.record_request();
        let request = AccessEvent::Request { key: id.to_string() };
        let miss = AccessEvent::Miss { key: id.to_string() };

        match fetched {
            Ok(value) => {
                state.cache.insert(id.to_string(), value.clone());
                state.log.record_all([
                    request,
                    miss,
                    AccessEvent::Store { key: id.to_string() },
                ]);
                info!("Cached fresh value for {}", id);
                Ok(value)
            }
            Err(err) => {
                state.log.record_all([request, miss]);
                warn!("Backing service fetch failed for {}: {}", id, err);
                Err(err.into())
            }
        }
    }

    /// Answers from cache, recording the request and hit, or returns None.
    async fn serve_cached(&self, id: &str) -> Option<String> {
        let mut state = self.state.write().await;
        let value = state.cache.get(id).cloned()?;

        state.stats.record_request();
        state.stats.record_hit();
        state.log.record_all([
            AccessEvent::Request { key: id.to_string() },
            AccessEvent::Hit { key: id.to_string() },
        ]);
        info!("Cache hit: {}", id);
        Some(value)
    }

    // == Save Data ==
    /// Writes `data` for `id` through to the backing service.
    ///
    /// The write policy runs first; a denied write touches nothing but the
    /// log. An allowed write drops the cached entry before the store is
    /// issued, and the entry stays dropped even if the store fails or is
    /// cancelled midway.
    pub async fn save_data(&self, id: &str, data: &str, cancel: &CancellationToken) -> Result<()> {
        validate_key(id)?;
        if cancel.is_cancelled() {
            return Err(cancelled("write", id));
        }

        if let PolicyDecision::Deny(reason) = self.policy.evaluate(id, data) {
            warn!("Write to {} denied: {}", id, reason);
            self.state.write().await.log.record_all([
                AccessEvent::AuthCheck { key: id.to_string() },
                AccessEvent::AuthDeny {
                    key: id.to_string(),
                    reason: reason.clone(),
                },
            ]);
            return Err(ProxyError::PolicyViolation(reason));
        }

        let _flight = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(cancelled("write", id)),
            guard = self.flights.acquire(id) => guard,
        };

        {
            let mut state = self.state.write().await;
            state.cache.remove(id);
            state.log.record_all([
                AccessEvent::AuthCheck { key: id.to_string() },
                AccessEvent::Invalidation { key: id.to_string() },
            ]);
        }
        debug!("Invalidated cache entry before write: {}", id);

        let stored = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(cancelled("write", id)),
            result = self.backend.store(id, data) => result,
        };

        match stored {
            Ok(()) => {
                self.state
                    .write()
                    .await
                    .log
                    .record(AccessEvent::SaveComplete { key: id.to_string() });
                info!("Saved {}", id);
                Ok(())
            }
            Err(err) => {
                warn!("Backing service store failed for {}: {}", id, err);
                Err(err.into())
            }
        }
    }

    // == Instrumentation ==
    /// Percentage of reads served from cache, rounded; 0 before any read.
    pub async fn hit_rate(&self) -> u32 {
        self.state.read().await.stats.hit_rate
    }

    pub async fn cache_size(&self) -> usize {
        self.state.read().await.cache.len()
    }

    pub async fn request_count(&self) -> u64 {
        self.state.read().await.stats.request_count
    }

    pub async fn cache_hits(&self) -> u64 {
        self.state.read().await.stats.cache_hits
    }

    /// Snapshot of counters and cache size.
    pub async fn stats(&self) -> ProxyStats {
        let state = self.state.read().await;
        let mut stats = state.stats.clone();
        stats.set_cache_size(state.cache.len());
        stats
    }

    /// Number of keys with a read or write currently holding or awaiting them.
    pub fn in_flight_keys(&self) -> usize {
        self.flights.len()
    }

    /// Owned copy of the access log, oldest entry first.
    pub async fn access_log(&self) -> Vec<AccessLogEntry> {
        self.state.read().await.log.snapshot()
    }

    /// Empties the cache. Counters are kept and the clear is logged.
    pub async fn clear_cache(&self) {
        let mut state = self.state.write().await;
        state.cache.clear();
        state.log.record(AccessEvent::CacheClear);
        info!("Cache cleared");
    }

    /// Empties the access log. Cache and counters are kept.
    pub async fn clear_log(&self) {
        let mut state = self.state.write().await;
        let dropped = state.log.len();
        state.log.clear();
        debug!("Access log cleared ({} entries dropped)", dropped);
    }
}

fn validate_key(id: &str) -> Result<()> {
    if id.is_empty() {
        Err(ProxyError::InvalidKey)
    } else {
        Ok(())
    }
}

fn cancelled(operation: &str, id: &str) -> ProxyError {
    debug!("{} of {} cancelled", operation, id);
    ProxyError::Cancelled
}
