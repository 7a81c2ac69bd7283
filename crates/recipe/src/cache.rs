//! Expiring key/value cache used in front of recipe sources.
//!
//! The cache is a capability handed to whoever needs it. There is no global
//! instance; tests drive expiry through [`ManualClock`]. Entries are bounded
//! by an LRU capacity.

use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// Default lifetime of a cached recipe lookup
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60 * 24);

/// Source of "now" for expiry decisions
pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<Instant>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Instant::now()),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

/// Capability interface of a cache: look up, or store with a lifetime
pub trait CacheService<V> {
    /// The value stored under `key`, unless absent or expired
    fn get(&self, key: &str) -> Option<V>;

    fn put(&self, key: &str, value: V, ttl: Duration);
}

impl<V, T: CacheService<V> + ?Sized> CacheService<V> for &T {
    fn get(&self, key: &str) -> Option<V> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: V, ttl: Duration) {
        (**self).put(key, value, ttl)
    }
}

struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

/// Capacity used when zero entries are requested
pub const DEFAULT_CACHE_CAPACITY: NonZeroUsize = match NonZeroUsize::new(1000) {
    Some(n) => n,
    None => unreachable!(),
};

/// Process-local LRU cache with per-entry expiry
///
/// Expired entries are dropped on access, and all of them are swept before a
/// put into a full cache evicts a live entry.
pub struct InMemoryCache<V, C = SystemClock> {
    entries: Mutex<LruCache<String, CacheEntry<V>>>,
    clock: C,
}

impl<V> InMemoryCache<V, SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    /// Cache holding at most `max_entries` (zero means the default capacity)
    pub fn with_capacity(max_entries: usize) -> Self {
        Self::with_capacity_and_clock(max_entries, SystemClock)
    }
}

impl<V> Default for InMemoryCache<V, SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, C: Clock> InMemoryCache<V, C> {
    pub fn with_clock(clock: C) -> Self {
        Self::with_capacity_and_clock(DEFAULT_CACHE_CAPACITY.get(), clock)
    }

    pub fn with_capacity_and_clock(max_entries: usize, clock: C) -> Self {
        let capacity = NonZeroUsize::new(max_entries).unwrap_or(DEFAULT_CACHE_CAPACITY);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            clock,
        }
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<String, CacheEntry<V>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn capacity(&self) -> usize {
        self.lock().cap().get()
    }

    /// Number of stored entries, expired ones included until purged
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every expired entry; returns how many were removed
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        Self::sweep(&mut self.lock(), now)
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn sweep(entries: &mut LruCache<String, CacheEntry<V>>, now: Instant) -> usize {
        let expired: Vec<String> = entries
            .iter()
            .filter(|(_, entry)| entry.expires_at <= now)
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            entries.pop(key);
        }

        if !expired.is_empty() {
            tracing::debug!(removed = expired.len(), "purged expired cache entries");
        }
        expired.len()
    }
}

impl<V: Clone, C: Clock> CacheService<V> for InMemoryCache<V, C> {
    fn get(&self, key: &str) -> Option<V> {
        let now = self.clock.now();
        let mut entries = self.lock();

        let expired = match entries.get(key) {
            Some(entry) if entry.expires_at > now => return Some(entry.value.clone()),
            Some(_) => true,
            None => false,
        };
        if expired {
            entries.pop(key);
        }
        None
    }

    fn put(&self, key: &str, value: V, ttl: Duration) {
        let now = self.clock.now();
        let expires_at = now.checked_add(ttl).unwrap_or(now + DEFAULT_TTL);
        let mut entries = self.lock();

        if entries.len() == entries.cap().get() && !entries.contains(key) {
            Self::sweep(&mut entries, now);
        }
        entries.push(key.to_string(), CacheEntry { value, expires_at });
    }
}
