//! Pacing and read-cache state shared by every call from one process.
//!
//! Held behind [`ClientState`] so the client does not own ambient globals:
//! tests get a fresh instance each, and a shared external store could
//! stand in without touching call sites. The state is per instance; N
//! processes each allow one call per interval.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use serde_json::Value;
use tokio::time::Instant;

pub trait ClientState: Send + Sync {
    /// Claim the next send slot no earlier than `now` and at least
    /// `min_interval` after the previously claimed one. The returned
    /// instant becomes the new last-send time.
    fn reserve_slot(&self, now: Instant, min_interval: Duration) -> Instant;

    /// A cached body younger than `ttl`, if any.
    fn cached(&self, key: &str, now: Instant, ttl: Duration) -> Option<Value>;

    /// Remember a successful read. Entries older than `ttl` are dropped.
    fn store(&self, key: String, body: Value, now: Instant, ttl: Duration);
}

struct CacheEntry {
    body: Value,
    stored_at: Instant,
}

/// In-memory state for a single process.
#[derive(Default)]
pub struct LocalClientState {
    last_send: Mutex<Option<Instant>>,
    cache: Mutex<HashMap<String, CacheEntry>>,
}

impl LocalClientState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cached_entries(&self) -> usize {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl ClientState for LocalClientState {
    fn reserve_slot(&self, now: Instant, min_interval: Duration) -> Instant {
        let mut last = self.last_send.lock().unwrap_or_else(PoisonError::into_inner);
        let slot = match *last {
            Some(prev) => now.max(prev + min_interval),
            None => now,
        };
        *last = Some(slot);
        slot
    }

    fn cached(&self, key: &str, now: Instant, ttl: Duration) -> Option<Value> {
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        match cache.get(key) {
            Some(entry) if now.duration_since(entry.stored_at) < ttl => Some(entry.body.clone()),
            Some(_) => {
                cache.remove(key);
                None
            }
            None => None,
        }
    }

    fn store(&self, key: String, body: Value, now: Instant, ttl: Duration) {
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        cache.retain(|_, entry| now.duration_since(entry.stored_at) < ttl);
        cache.insert(
            key,
            CacheEntry {
                body,
                stored_at: now,
            },
        );
    }
}
