//! Cache key and entry types.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::library::File;

/// Identifies one recursive listing.
///
/// The skip pattern is compared as raw text, so `(?i)live` and `(?i:live)`
/// are different keys even though they match the same paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CacheKey {
    /// Decoded library path the listing was collected from.
    pub path: String,
    /// Skip pattern the listing was filtered with.
    pub skip_pattern: Option<String>,
}

impl CacheKey {
    /// Create a cache key.
    pub fn new(path: impl Into<String>, skip_pattern: Option<&str>) -> Self {
        Self {
            path: path.into(),
            skip_pattern: skip_pattern.map(String::from),
        }
    }
}

/// A cached recursive listing.
///
/// Entries are replaced wholesale and never mutated after insertion.
#[derive(Debug, Clone, Serialize)]
pub struct CacheEntry {
    /// Flattened, filtered file list for the key's subtree.
    pub files: Vec<File>,
    /// When the listing was collected.
    pub fetched_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Create a cache entry.
    pub fn new(files: Vec<File>, fetched_at: DateTime<Utc>) -> Self {
        Self { files, fetched_at }
    }

    /// Whether the entry can be used without refetching.
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        self.age(now) < ttl
    }

    /// Age of this entry at `now`.
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now.signed_duration_since(self.fetched_at)
    }

    /// Time left before the entry goes stale, clamped at zero.
    pub fn remaining_ttl(&self, now: DateTime<Utc>, ttl: Duration) -> Duration {
        ttl.checked_sub(&self.age(now))
            .unwrap_or(ttl)
            .max(Duration::zero())
    }
}
