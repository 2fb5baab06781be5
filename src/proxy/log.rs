//! Access Log Module
//!
//! Append-only audit trail of everything the proxy does.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

// == Access Event ==
/// A single auditable proxy decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AccessEvent {
    /// A read was requested
    Request { key: String },
    /// A read was served from cache
    Hit { key: String },
    /// A read had to go to the backing service
    Miss { key: String },
    /// A fetched value was placed in the cache
    Store { key: String },
    /// A write is being checked against the write policy
    AuthCheck { key: String },
    /// The write policy refused a write
    AuthDeny { key: String, reason: String },
    /// A cached value was dropped ahead of a write
    Invalidation { key: String },
    /// The backing service accepted a write
    SaveComplete { key: String },
    /// The whole cache was emptied
    CacheClear,
}

impl AccessEvent {
    /// Returns the record key this event refers to, if any.
    pub fn key(&self) -> Option<&str> {
        match self {
            AccessEvent::Request { key }
            | AccessEvent::Hit { key }
            | AccessEvent::Miss { key }
            | AccessEvent::Store { key }
            | AccessEvent::AuthCheck { key }
            | AccessEvent::AuthDeny { key, .. }
            | AccessEvent::Invalidation { key }
            | AccessEvent::SaveComplete { key } => Some(key),
            AccessEvent::CacheClear => None,
        }
    }
}

impl fmt::Display for AccessEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessEvent::Request { key } => write!(f, "data request: {}", key),
            AccessEvent::Hit { key } => write!(f, "cache hit: {}", key),
            AccessEvent::Miss { key } => write!(f, "cache miss: {}", key),
            AccessEvent::Store { key } => write!(f, "cache store: {}", key),
            AccessEvent::AuthCheck { key } => write!(f, "auth check: {}", key),
            AccessEvent::AuthDeny { key, reason } => {
                write!(f, "auth denied: {} ({})", key, reason)
            }
            AccessEvent::Invalidation { key } => write!(f, "cache invalidated: {}", key),
            AccessEvent::SaveComplete { key } => write!(f, "save complete: {}", key),
            AccessEvent::CacheClear => write!(f, "cache cleared"),
        }
    }
}

// == Access Log Entry ==
/// An event stamped with the time it was committed to the log.
#[derive(Debug, Clone, Serialize)]
pub struct AccessLogEntry {
    pub at: DateTime<Utc>,
    #[serde(flatten)]
    pub event: AccessEvent,
}

impl AccessLogEntry {
    pub fn new(event: AccessEvent) -> Self {
        Self {
            at: Utc::now(),
            event,
        }
    }
}

impl fmt::Display for AccessLogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.at.format("%H:%M:%S%.3f"), self.event)
    }
}

// == Access Log ==
/// Ordered, append-only sequence of access log entries.
///
/// Entries are never reordered or deduplicated; the only removal is a full clear.
#[derive(Debug, Default)]
pub struct AccessLog {
    entries: Vec<AccessLogEntry>,
}

impl AccessLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a single event.
    pub fn record(&mut self, event: AccessEvent) {
        self.entries.push(AccessLogEntry::new(event));
    }

    /// Appends several events in order, stamped with the same instant.
    pub fn record_all(&mut self, events: impl IntoIterator<Item = AccessEvent>) {
        let at = Utc::now();
        self.entries
            .extend(events.into_iter().map(|event| AccessLogEntry { at, event }));
    }

    /// Returns an owned copy of every entry, oldest first.
    pub fn snapshot(&self) -> Vec<AccessLogEntry> {
        self.entries.clone()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
