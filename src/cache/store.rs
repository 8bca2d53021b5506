//! In-memory listing cache.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use chrono::Duration;

use super::clock::{Clock, SystemClock};
use super::entry::{CacheEntry, CacheKey};
use crate::library::File;

/// Default time-to-live for cached listings (7 days).
pub const DEFAULT_TTL_SECONDS: u64 = 604_800;

/// Memoized recursive listings, keyed by path and skip pattern.
///
/// Stale entries stay in the map until the next successful collection for
/// the same key replaces them. Each `put` swaps in a whole entry, so readers
/// see either the previous listing or the new one.
pub struct ListingCache {
    entries: RwLock<HashMap<CacheKey, Arc<CacheEntry>>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

/// Counts of cached listings by freshness.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub fresh: usize,
    pub stale: usize,
    pub files: usize,
}

impl ListingCache {
    /// Create a cache using the wall clock.
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    /// Create a cache with a custom time source.
    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    /// Configured time-to-live.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Look up an entry regardless of freshness.
    pub fn get(&self, key: &CacheKey) -> Option<Arc<CacheEntry>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Look up an entry that is still within its TTL.
    pub fn get_fresh(&self, key: &CacheKey) -> Option<Arc<CacheEntry>> {
        let now = self.clock.now();
        self.get(key).filter(|entry| entry.is_fresh(now, self.ttl))
    }

    /// Store a listing stamped with the current time, replacing any entry
    /// for the same key.
    pub fn put(&self, key: CacheKey, files: Vec<File>) -> Arc<CacheEntry> {
        let entry = Arc::new(CacheEntry::new(files, self.clock.now()));
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, Arc::clone(&entry));
        entry
    }

    /// Number of cached listings, fresh or stale.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Tally fresh and stale listings.
    pub fn stats(&self) -> CacheStats {
        let now = self.clock.now();
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);

        entries.values().fold(CacheStats::default(), |mut stats, entry| {
            if entry.is_fresh(now, self.ttl) {
                stats.fresh += 1;
            } else {
                stats.stale += 1;
            }
            stats.files += entry.files.len();
            stats
        })
    }
}

impl Default for ListingCache {
    fn default() -> Self {
        Self::new(Duration::seconds(DEFAULT_TTL_SECONDS as i64))
    }
}

impl std::fmt::Debug for ListingCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListingCache")
            .field("ttl", &self.ttl)
            .field("entries", &self.len())
            .finish()
    }
}
