//! Single-slot cache with a fixed time-to-live.
//!
//! The slot holds one value and the time it was fetched. Readers either see
//! a whole entry stored by some earlier [`TimedCache::store`] or nothing at
//! all. Expiry is checked lazily on [`TimedCache::load`]; there is no
//! background eviction.

use chrono::{DateTime, Duration, Utc};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

/// How long a fetched front page stays fresh.
pub const CACHE_TTL: Duration = Duration::hours(1);

/// One cached value together with its fetch timestamp.
#[derive(Debug)]
pub struct CacheEntry<T> {
    pub value: Arc<T>,
    pub fetched_at: DateTime<Utc>,
}

// Manual impl so `T` itself does not need to be `Clone`.
impl<T> Clone for CacheEntry<T> {
    fn clone(&self) -> Self {
        Self {
            value: Arc::clone(&self.value),
            fetched_at: self.fetched_at,
        }
    }
}

/// A concurrency-safe slot holding at most one value.
///
/// The lock is only held long enough to clone or replace the entry, so a
/// store never exposes a half-written entry and the last writer wins.
#[derive(Debug)]
pub struct TimedCache<T> {
    slot: RwLock<Option<CacheEntry<T>>>,
    ttl: Duration,
}

impl<T> TimedCache<T> {
    /// Create an empty cache whose entries expire after `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            slot: RwLock::new(None),
            ttl,
        }
    }

    /// How long a stored entry stays fresh.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the cached value if one is present and still fresh.
    pub fn load(&self) -> Option<Arc<T>> {
        self.load_at(Utc::now())
    }

    /// Like [`load`](Self::load), observing the cache at `now`.
    ///
    /// An entry is fresh while `now - fetched_at <= ttl`. A stale entry is
    /// cleared so later loads don't keep re-evaluating it.
    ///
    /// # Arguments
    ///
    /// * `now` - The observation time
    ///
    /// # Returns
    ///
    /// The cached value, or `None` if the slot is empty or the entry is stale.
    pub fn load_at(&self, now: DateTime<Utc>) -> Option<Arc<T>> {
        let entry = self
            .slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()?;

        let age = now - entry.fetched_at;
        if age <= self.ttl {
            debug!(age_secs = age.num_seconds(), "Cache hit");
            return Some(entry.value);
        }

        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        // Only clear the entry we judged stale; a concurrent store may have
        // already replaced it with a fresh one.
        if slot
            .as_ref()
            .is_some_and(|current| Arc::ptr_eq(&current.value, &entry.value))
        {
            *slot = None;
        }
        debug!(age_secs = age.num_seconds(), "Cache entry expired");
        None
    }

    /// Replace the whole entry with `value` fetched at `fetched_at`.
    pub fn store(&self, value: Arc<T>, fetched_at: DateTime<Utc>) {
        let entry = CacheEntry { value, fetched_at };
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = Some(entry);
    }

    /// Drop whatever is cached.
    pub fn clear(&self) {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    #[cfg(test)]
    fn is_occupied(&self) -> bool {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl<T> Default for TimedCache<T> {
    fn default() -> Self {
        Self::new(CACHE_TTL)
    }
}
