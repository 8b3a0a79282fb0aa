//! In-memory key/value cache with per-entry expiry
//!
//! Expired entries are never returned. They are dropped lazily when read,
//! or swept when the cache is sized or snapshotted; nothing runs in the
//! background.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::Duration;

use tokio::time::Instant;

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

impl<V> CacheEntry<V> {
    fn is_expired(&self, now: Instant) -> bool {
        now > self.expires_at
    }
}

/// TTL cache. A zero lifetime turns every `set` into a no-op.
#[derive(Debug)]
pub struct TtlCache<K, V> {
    entries: HashMap<K, CacheEntry<V>>,
    ttl: Duration,
}

impl<K: Eq + Hash + Clone, V: Clone> TtlCache<K, V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
        }
    }

    /// Build from a configured millisecond lifetime; zero or negative
    /// disables caching.
    pub fn from_millis(ttl_ms: i64) -> Self {
        Self::new(Duration::from_millis(ttl_ms.max(0) as u64))
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    pub fn set(&mut self, key: K, value: V) {
        if !self.is_enabled() {
            return;
        }
        let expires_at = Instant::now() + self.ttl;
        self.entries.insert(key, CacheEntry { value, expires_at });
    }

    /// Value for `key` if still valid. Reading an expired entry evicts it.
    pub fn get(&mut self, key: &K) -> Option<V> {
        let now = Instant::now();
        match self.entries.get(key) {
            Some(entry) if entry.is_expired(now) => {
                self.entries.remove(key);
                None
            }
            Some(entry) => Some(entry.value.clone()),
            None => None,
        }
    }

    pub fn has(&mut self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Remove `key`, reporting whether an entry was stored for it.
    #[allow(dead_code)]
    pub fn delete(&mut self, key: &K) -> bool {
        self.entries.remove(key).is_some()
    }

    #[allow(dead_code)]
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of valid entries
    pub fn size(&mut self) -> usize {
        self.cleanup();
        self.entries.len()
    }

    #[allow(dead_code)]
    pub fn valid_keys(&mut self) -> Vec<K> {
        self.cleanup();
        self.entries.keys().cloned().collect()
    }

    pub fn valid_values(&mut self) -> Vec<V> {
        self.cleanup();
        self.entries.values().map(|e| e.value.clone()).collect()
    }

    fn cleanup(&mut self) {
        let now = Instant::now();
        self.entries.retain(|_, entry| !entry.is_expired(now));
    }
}
