//! In-memory TTL cache for upstream API responses
//!
//! Entries are keyed by request path (including the query string) and hold
//! the raw response body. An entry is served only strictly before its expiry
//! instant. Expired entries stay in the map until the same key is written
//! again; the key space is a small fixed set of endpoint shapes, so there is
//! no size bound and no background eviction.
//!
//! Concurrent misses on the same key are not coalesced: every caller that
//! misses fetches from upstream and the last write wins.

use bytes::Bytes;
use std::{
    collections::HashMap,
    sync::{PoisonError, RwLock},
    time::{Duration, Instant},
};

#[cfg(test)]
mod tests;

struct CacheEntry {
    payload: Bytes,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_fresh_at(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Thread-safe response cache with per-entry expiry
#[derive(Default)]
pub struct TtlCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl TtlCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached payload for `key` if it has not expired.
    pub fn get(&self, key: &str) -> Option<Bytes> {
        self.get_at(key, Instant::now())
    }

    fn get_at(&self, key: &str, now: Instant) -> Option<Bytes> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .get(key)
            .filter(|entry| entry.is_fresh_at(now))
            .map(|entry| entry.payload.clone())
    }

    /// Store `payload` under `key`, replacing any previous entry.
    pub fn put(&self, key: impl Into<String>, payload: Bytes, ttl: Duration) {
        self.put_at(key.into(), payload, ttl, Instant::now());
    }

    fn put_at(&self, key: String, payload: Bytes, ttl: Duration, now: Instant) {
        let entry = CacheEntry {
            payload,
            // Saturate instead of panicking on absurd TTLs.
            expires_at: now.checked_add(ttl).unwrap_or(now + Duration::from_secs(86_400 * 365)),
        };
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, entry);
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Route-to-TTL rule used by [`TtlPolicy`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TtlRule {
    /// Request path without its query string, e.g. `/nba/v1/teams`.
    pub route: String,
    pub ttl: Duration,
}

/// Table-driven TTL selection by request path.
///
/// Rules are matched against the path before `?`; the first matching rule
/// wins, otherwise the default TTL applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TtlPolicy {
    rules: Vec<TtlRule>,
    default_ttl: Duration,
}

impl TtlPolicy {
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            rules: Vec::new(),
            default_ttl,
        }
    }

    pub fn with_rule(mut self, route: impl Into<String>, ttl: Duration) -> Self {
        self.rules.push(TtlRule {
            route: route.into(),
            ttl,
        });
        self
    }

    pub fn ttl_for(&self, path: &str) -> Duration {
        let route = path.split_once('?').map_or(path, |(route, _)| route);
        self.rules
            .iter()
            .find(|rule| rule.route == route)
            .map_or(self.default_ttl, |rule| rule.ttl)
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    pub fn rules(&self) -> &[TtlRule] {
        &self.rules
    }
}
