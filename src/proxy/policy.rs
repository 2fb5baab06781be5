//! Write Policy Module
//!
//! Decides whether a write may go through to the backing service.

// == Policy Decision ==
/// Outcome of evaluating a write against a policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyDecision {
    Allow,
    /// Refused, with a human-readable reason
    Deny(String),
}

// == Write Policy ==
/// Pluggable authorization check applied before every write.
///
/// Any `Fn(&str, &str) -> PolicyDecision` closure is also a policy, taking
/// the key and payload in that order.
pub trait WritePolicy: Send + Sync {
    fn evaluate(&self, key: &str, payload: &str) -> PolicyDecision;
}

impl<F> WritePolicy for F
where
    F: Fn(&str, &str) -> PolicyDecision + Send + Sync,
{
    fn evaluate(&self, key: &str, payload: &str) -> PolicyDecision {
        self(key, payload)
    }
}

// == Max Payload Size ==
/// Denies payloads longer than `max_len` characters.
#[derive(Debug, Clone, Copy)]
pub struct MaxPayloadSize {
    pub max_len: usize,
}

impl MaxPayloadSize {
    pub const DEFAULT_MAX_LEN: usize = 100;

    pub fn new(max_len: usize) -> Self {
        Self { max_len }
    }
}

impl Default for MaxPayloadSize {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_LEN)
    }
}

impl WritePolicy for MaxPayloadSize {
    fn evaluate(&self, _key: &str, payload: &str) -> PolicyDecision {
        // Length in characters, not bytes.
        if payload.chars().count() > self.max_len {
            PolicyDecision::Deny(format!(
                "payload exceeds maximum size of {} characters",
                self.max_len
            ))
        } else {
            PolicyDecision::Allow
        }
    }
}
