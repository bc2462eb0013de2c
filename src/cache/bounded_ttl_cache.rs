//! Size-bounded cache with per-entry TTL (Time To Live) support.
//!
//! Entries expire lazily: an expired entry is only purged when it is next read.
//! When the cache is full the oldest-inserted entry is evicted (FIFO), regardless
//! of expiry or how recently it was read.

use serde::Serialize;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

/// Upper bound used when `inserted_at + ttl` overflows `Instant`.
const MAX_TTL: Duration = Duration::from_secs(60 * 60 * 24 * 365 * 100);

/// A cache entry with its insertion and expiry timestamps.
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    inserted_at: Instant,
    expires_at: Instant,
}

impl<V> CacheEntry<V> {
    fn new(value: V, ttl: Duration) -> Self {
        let inserted_at = Instant::now();
        let expires_at = inserted_at
            .checked_add(ttl)
            .unwrap_or_else(|| inserted_at + MAX_TTL);

        Self {
            value,
            inserted_at,
            expires_at,
        }
    }
}

/// Entry storage plus the insertion order used for eviction.
#[derive(Debug)]
struct Store<V> {
    entries: HashMap<String, CacheEntry<V>>,
    order: VecDeque<String>,
}

impl<V> Store<V> {
    fn new() -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    fn remove(&mut self, key: &str) -> bool {
        if self.entries.remove(key).is_some() {
            self.order.retain(|k| k != key);
            true
        } else {
            false
        }
    }
}

/// Statistics snapshot for a single cache instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    /// Raw number of stored entries, including expired ones not yet purged
    pub size: usize,

    /// Entries whose expiry lies in the future
    pub valid_entries: usize,

    /// `size - valid_entries`
    pub expired_entries: usize,

    /// Configured capacity
    pub max_size: usize,

    /// Human-readable estimate of the serialized size of all entries
    pub approx_memory_usage: String,
}

/// A thread-safe, size-bounded cache with per-entry expiration.
///
/// Keys are strings. Each entry carries its own expiry, defaulting to the TTL given
/// at construction. At most `max_size` entries are stored; inserting a new key into a
/// full cache first evicts the entry that was inserted earliest. A cache with
/// `max_size == 0` stores nothing.
///
/// The cache can be cloned cheaply; clones share the same underlying storage.
#[derive(Clone)]
pub struct BoundedTtlCache<V>
where
    V: Clone,
{
    store: Arc<RwLock<Store<V>>>,
    max_size: usize,
    default_ttl: Duration,
}

impl<V> BoundedTtlCache<V>
where
    V: Clone,
{
    /// Create a new cache holding at most `max_size` entries with the given default TTL.
    pub fn new(max_size: usize, default_ttl: Duration) -> Self {
        Self {
            store: Arc::new(RwLock::new(Store::new())),
            max_size,
            default_ttl,
        }
    }

    /// Insert a value using the default TTL.
    pub fn insert(&self, key: impl Into<String>, value: V) {
        self.insert_with_ttl(key, value, self.default_ttl);
    }

    /// Insert a value with an explicit TTL.
    ///
    /// Replacing an existing key keeps its position in the eviction order and never
    /// evicts another entry. Inserting a new key into a full cache evicts the oldest
    /// inserted entry first, whether or not it has expired.
    pub fn insert_with_ttl(&self, key: impl Into<String>, value: V, ttl: Duration) {
        if self.max_size == 0 {
            return;
        }

        let key = key.into();
        let entry = CacheEntry::new(value, ttl);

        let Ok(mut store) = self.store.write() else {
            return;
        };

        if let Some(existing) = store.entries.get_mut(&key) {
            *existing = entry;
            return;
        }

        if store.entries.len() >= self.max_size {
            if let Some(oldest) = store.order.pop_front() {
                store.entries.remove(&oldest);
                tracing::trace!(key = %oldest, "Evicted oldest cache entry");
            }
        }

        store.order.push_back(key.clone());
        store.entries.insert(key, entry);
    }

    /// Get a value from the cache if it exists and hasn't expired.
    ///
    /// An expired entry is removed as a side effect.
    pub fn get(&self, key: &str) -> Option<V> {
        let now = Instant::now();
        let Ok(mut store) = self.store.write() else {
            return None;
        };

        let expired = match store.entries.get(key) {
            Some(entry) if now <= entry.expires_at => return Some(entry.value.clone()),
            Some(_) => true,
            None => false,
        };

        if expired {
            store.remove(key);
            tracing::trace!(key = %key, "Purged expired cache entry");
        }

        None
    }

    /// Check if a key exists in the cache and hasn't expired.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Remove a specific key from the cache.
    pub fn remove(&self, key: &str) {
        if let Ok(mut store) = self.store.write() {
            store.remove(key);
        }
    }

    /// Clear all entries from the cache.
    pub fn clear(&self) {
        if let Ok(mut store) = self.store.write() {
            store.entries.clear();
            store.order.clear();
        }
    }

    /// Get the number of stored entries (including expired ones).
    pub fn len(&self) -> usize {
        if let Ok(store) = self.store.read() {
            store.entries.len()
        } else {
            0
        }
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stored keys, oldest first.
    pub fn keys(&self) -> Vec<String> {
        if let Ok(store) = self.store.read() {
            store.order.iter().cloned().collect()
        } else {
            Vec::new()
        }
    }

    /// Get the maximum number of entries.
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Get the default TTL for this cache.
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }
}

impl<V> BoundedTtlCache<V>
where
    V: Clone + Serialize,
{
    /// Take a statistics snapshot.
    ///
    /// The memory estimate serializes every stored entry, so this is O(n) in the
    /// cache contents and belongs on a monitoring interval, not a request path.
    pub fn stats(&self) -> CacheStats {
        let now = Instant::now();
        let Ok(store) = self.store.read() else {
            return CacheStats {
                size: 0,
                valid_entries: 0,
                expired_entries: 0,
                max_size: self.max_size,
                approx_memory_usage: format_bytes(0),
            };
        };

        let size = store.entries.len();
        let valid_entries = store
            .entries
            .values()
            .filter(|entry| entry.expires_at > now)
            .count();

        let serialized: Vec<SerializedEntry<'_, V>> = store
            .order
            .iter()
            .filter_map(|key| {
                store.entries.get(key).map(|entry| SerializedEntry {
                    key,
                    data: &entry.value,
                    age_ms: now.saturating_duration_since(entry.inserted_at).as_millis(),
                    expires_in_ms: entry.expires_at.saturating_duration_since(now).as_millis(),
                })
            })
            .collect();
        let bytes = serde_json::to_vec(&serialized)
            .map(|buf| buf.len())
            .unwrap_or(0);

        CacheStats {
            size,
            valid_entries,
            expired_entries: size - valid_entries,
            max_size: self.max_size,
            approx_memory_usage: format_bytes(bytes),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SerializedEntry<'a, V> {
    key: &'a str,
    data: &'a V,
    age_ms: u128,
    expires_in_ms: u128,
}

/// Format a byte count as `B`, `KB` or `MB`.
pub fn format_bytes(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = 1024 * 1024;

    if bytes < KB {
        format!("{} B", bytes)
    } else if bytes < MB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    }
}

impl<V> std::fmt::Debug for BoundedTtlCache<V>
where
    V: Clone,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundedTtlCache")
            .field("max_size", &self.max_size)
            .field("default_ttl", &self.default_ttl)
            .field("entries", &self.len())
            .finish()
    }
}
