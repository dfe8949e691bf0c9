use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::{Duration, Instant},
};

use dashmap::DashMap;

/// A cached payload with its own expiration deadline
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

impl<V> CacheEntry<V> {
    fn new(value: V, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: Instant::now() + ttl,
        }
    }

    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

#[derive(Debug, Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Concurrent key/value cache with per-entry TTL.
///
/// Cloning is cheap and every clone shares the same storage, so one instance
/// can be handed to request handlers and to the sweep task alike. Each
/// operation is atomic on its own; nothing spans two calls.
#[derive(Debug, Clone)]
pub struct TtlCache<V> {
    map: Arc<DashMap<String, CacheEntry<V>>>,
    counters: Arc<Counters>,
    default_ttl: Duration,
    enabled: bool,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            map: Arc::new(DashMap::new()),
            counters: Arc::new(Counters::default()),
            default_ttl,
            enabled: true,
        }
    }

    /// A cache that never stores anything. Every `get` is a miss.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::new(Duration::ZERO)
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Returns the payload when present and not expired.
    /// An expired entry is dropped on the spot.
    pub fn get(&self, key: &str) -> Option<V> {
        let now = Instant::now();

        let hit = match self.map.get(key) {
            Some(entry) if !entry.is_expired(now) => Some(entry.value.clone()),
            Some(_) => None,
            None => None,
        };

        match hit {
            Some(value) => {
                self.counters.hits.fetch_add(1, Ordering::Relaxed);
                Some(value)
            }
            None => {
                // Re-check under the shard lock: a concurrent `set` may have refreshed it.
                self.map.remove_if(key, |_, entry| entry.is_expired(now));
                self.counters.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    pub fn set(&self, key: &str, value: V) {
        self.set_with_ttl(key, value, self.default_ttl);
    }

    /// Stores `value`, replacing whatever was cached under `key`.
    pub fn set_with_ttl(&self, key: &str, value: V, ttl: Duration) {
        if !self.enabled {
            return;
        }
        self.map.insert(key.to_string(), CacheEntry::new(value, ttl));
    }

    /// Removes the entry for `key`. Returns whether something was removed.
    pub fn invalidate(&self, key: &str) -> bool {
        self.map.remove(key).is_some()
    }

    /// Drops every expired entry and returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.map.len();
        self.map.retain(|_, entry| !entry.is_expired(now));
        before.saturating_sub(self.map.len())
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.counters.hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
            entries: self.map.len(),
        }
    }
}
