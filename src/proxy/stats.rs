//! Proxy Statistics Module
//!
//! Tracks read requests and cache hits.

use serde::Serialize;

// == Proxy Stats ==
/// Read counters of a proxy, plus the cache size at snapshot time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProxyStats {
    /// Number of read requests
    pub request_count: u64,
    /// Number of reads served from cache
    pub cache_hits: u64,
    /// `round(cache_hits / request_count * 100)`, 0 before any request
    pub hit_rate: u32,
    /// Number of cached records
    pub cache_size: usize,
}

impl ProxyStats {
    // == Constructor ==
    /// Creates a new ProxyStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Record Request ==
    pub fn record_request(&mut self) {
        self.request_count += 1;
        self.hit_rate = hit_rate(self.cache_hits, self.request_count);
    }

    // == Record Hit ==
    /// Counts a hit; the matching request must already be recorded.
    pub fn record_hit(&mut self) {
        self.cache_hits += 1;
        self.hit_rate = hit_rate(self.cache_hits, self.request_count);
    }

    // == Update Cache Size ==
    pub fn set_cache_size(&mut self, size: usize) {
        self.cache_size = size;
    }
}

// == Hit Rate ==
/// Cache hit rate as a whole percentage, or 0 if no requests have been made.
pub fn hit_rate(hits: u64, requests: u64) -> u32 {
    if requests == 0 {
        0
    } else {
        (hits as f64 / requests as f64 * 100.0).round() as u32
    }
}
