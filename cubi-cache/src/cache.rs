//! In-memory TTL store.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Stored value with its creation time.
struct Entry<V> {
    value: V,
    created_at: Instant,
}

impl<V> Entry<V> {
    fn new(value: V) -> Self {
        Self {
            value,
            created_at: Instant::now(),
        }
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() > ttl
    }
}

/// Store configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Age after which an entry is considered gone
    pub ttl: Duration,
    /// Number of entries to preallocate
    pub initial_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(15 * 60),
            initial_capacity: 64,
        }
    }
}

impl StoreConfig {
    /// Sets the entry lifetime.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Sets the preallocated capacity.
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }
}

/// In-memory string-keyed store whose entries expire after a fixed TTL.
///
/// Readers share the lock; `set`, `try_insert` and `sweep` take it
/// exclusively. Every read applies the expiry check, so an entry older than
/// the TTL is never returned even if no sweep has removed it yet.
pub struct TtlStore<V> {
    entries: RwLock<HashMap<String, Entry<V>>>,
    ttl: Duration,
}

impl<V> TtlStore<V> {
    /// Creates a store whose entries live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self::with_config(StoreConfig::default().with_ttl(ttl))
    }

    /// Creates a store with custom configuration.
    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            entries: RwLock::new(HashMap::with_capacity(config.initial_capacity)),
            ttl: config.ttl,
        }
    }

    /// Returns the configured lifetime.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Inserts or replaces the entry for `key`, restarting its lifetime.
    pub fn set(&self, key: impl Into<String>, value: V) {
        self.entries.write().insert(key.into(), Entry::new(value));
    }

    /// Inserts `value` only if `key` is absent or expired.
    ///
    /// Check and insert happen under one write lock. Returns false, dropping
    /// `value`, when a live entry already holds the key.
    pub fn try_insert(&self, key: &str, value: V) -> bool {
        let mut entries = self.entries.write();
        if let Some(entry) = entries.get(key) {
            if !entry.is_expired(self.ttl) {
                return false;
            }
        }
        entries.insert(key.to_owned(), Entry::new(value));
        true
    }

    /// Returns true if a live entry exists for `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.entries
            .read()
            .get(key)
            .map_or(false, |e| !e.is_expired(self.ttl))
    }

    /// Removes the entry for `key`. Returns true if a live entry was removed.
    pub fn remove(&self, key: &str) -> bool {
        self.entries
            .write()
            .remove(key)
            .map_or(false, |e| !e.is_expired(self.ttl))
    }

    /// Clears all entries.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Removes every expired entry and returns how many were dropped.
    ///
    /// The whole pass runs under the write lock, so a concurrent `set` lands
    /// either before or after it.
    pub fn sweep(&self) -> usize {
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, e| !e.is_expired(self.ttl));
        before - entries.len()
    }

    /// Returns the number of resident entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if no entries are resident.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Returns store statistics.
    pub fn stats(&self) -> StoreStats {
        let entries = self.entries.read();
        let expired = entries.values().filter(|e| e.is_expired(self.ttl)).count();
        StoreStats {
            total_entries: entries.len(),
            expired_entries: expired,
            live_entries: entries.len().saturating_sub(expired),
        }
    }
}

impl<V: Clone> TtlStore<V> {
    /// Gets a copy of the value for `key`.
    ///
    /// Returns None if absent or expired.
    pub fn get(&self, key: &str) -> Option<V> {
        let entries = self.entries.read();
        entries.get(key).and_then(|e| {
            if e.is_expired(self.ttl) {
                None
            } else {
                Some(e.value.clone())
            }
        })
    }
}

impl<V> Default for TtlStore<V> {
    fn default() -> Self {
        Self::with_config(StoreConfig::default())
    }
}

/// Store statistics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreStats {
    pub total_entries: usize,
    pub expired_entries: usize,
    pub live_entries: usize,
}
