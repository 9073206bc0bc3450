//! Bounded, time-expiring memoization for resolver answers.
//!
//! [`ResolverCache`] keeps one entry per [`CacheKey`] (query kind + name).
//! Expiry and eviction only happen when the cache is touched: an expired
//! entry is dropped by the `get` that finds it, and an insertion that would
//! exceed the capacity evicts the least recently touched entry first. There
//! is no background sweeper.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::Instant;
use tracing::trace;

/// Default time-to-live applied by [`ResolverCache::insert`].
pub const DEFAULT_TTL: Duration = Duration::from_secs(10 * 60);
/// Default capacity of a cache built with [`ResolverCache::default`].
pub const DEFAULT_MAX_ENTRIES: usize = 2_000;

#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum QueryKind {
    Mx,
    Txt,
    A,
    Aaaa,
}

impl QueryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mx => "MX",
            Self::Txt => "TXT",
            Self::A => "A",
            Self::Aaaa => "AAAA",
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cache key rendered as `<KIND>:<name>`. Names are compared lower-cased and
/// without a trailing dot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub kind: QueryKind,
    pub name: String,
}

impl CacheKey {
    pub fn new(kind: QueryKind, name: impl AsRef<str>) -> Self {
        let name = name.as_ref().trim().trim_end_matches('.').to_ascii_lowercase();
        Self { kind, name }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.name)
    }
}

struct Slot<V> {
    value: V,
    expires_at: Instant,
    tick: u64,
}

struct Inner<V> {
    entries: HashMap<CacheKey, Slot<V>>,
    // tick -> key, oldest first
    recency: BTreeMap<u64, CacheKey>,
    next_tick: u64,
}

impl<V> Inner<V> {
    fn bump(&mut self) -> u64 {
        let tick = self.next_tick;
        self.next_tick += 1;
        tick
    }

    fn remove(&mut self, key: &CacheKey) -> Option<Slot<V>> {
        let slot = self.entries.remove(key)?;
        self.recency.remove(&slot.tick);
        Some(slot)
    }

    fn evict_oldest(&mut self) -> Option<CacheKey> {
        let (_, key) = self.recency.pop_first()?;
        self.entries.remove(&key);
        Some(key)
    }
}

/// Approximate-LRU cache with per-entry expiry, safe to share between tasks.
///
/// Every operation takes the internal lock once and never awaits while
/// holding it, so `get`/`set` are atomic with respect to concurrent callers.
pub struct ResolverCache<V> {
    inner: Mutex<Inner<V>>,
    default_ttl: Duration,
    max_entries: usize,
}

impl<V: Clone> ResolverCache<V> {
    pub fn new(default_ttl: Duration, max_entries: usize) -> Self {
        Self {
            inner: Mutex::new(Inner {
                entries: HashMap::new(),
                recency: BTreeMap::new(),
                next_tick: 0,
            }),
            default_ttl,
            max_entries: max_entries.max(1),
        }
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Returns a clone of the live value for `key` and marks it as most
    /// recently used. An expired entry is removed and reported as absent.
    pub fn get(&self, key: &CacheKey) -> Option<V> {
        let now = Instant::now();
        let mut guard = self.inner.lock();
        let inner = &mut *guard;

        let expires_at = inner.entries.get(key)?.expires_at;
        if now >= expires_at {
            inner.remove(key);
            trace!(%key, "cache entry expired");
            return None;
        }

        let tick = inner.bump();
        let slot = inner.entries.get_mut(key)?;
        let previous = std::mem::replace(&mut slot.tick, tick);
        let value = slot.value.clone();
        inner.recency.remove(&previous);
        inner.recency.insert(tick, key.clone());
        Some(value)
    }

    /// Stores `value` under `key` with the cache's default TTL.
    pub fn insert(&self, key: CacheKey, value: V) {
        self.set(key, value, self.default_ttl);
    }

    /// Stores `value` under `key` for `ttl`, replacing any previous entry and
    /// moving it to the most recently used position.
    pub fn set(&self, key: CacheKey, value: V, ttl: Duration) {
        let expires_at = Instant::now() + ttl;
        let mut guard = self.inner.lock();
        let inner = &mut *guard;

        if inner.remove(&key).is_none() {
            while inner.entries.len() >= self.max_entries {
                match inner.evict_oldest() {
                    Some(evicted) => trace!(key = %evicted, "cache entry evicted"),
                    None => break,
                }
            }
        }

        let tick = inner.bump();
        inner.recency.insert(tick, key.clone());
        inner.entries.insert(
            key,
            Slot {
                value,
                expires_at,
                tick,
            },
        );
    }

    /// Number of stored entries, expired ones included until touched.
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.entries.clear();
        inner.recency.clear();
    }
}

impl<V: Clone> Default for ResolverCache<V> {
    fn default() -> Self {
        Self::new(DEFAULT_TTL, DEFAULT_MAX_ENTRIES)
    }
}

impl<V> fmt::Debug for ResolverCache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolverCache")
            .field("entries", &self.inner.lock().entries.len())
            .field("default_ttl", &self.default_ttl)
            .field("max_entries", &self.max_entries)
            .finish()
    }
}

#[cfg(test)]
mod tests;
