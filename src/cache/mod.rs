//! Listing cache.
//!
//! Recursive directory listings are memoized in memory per
//! `(path, skip pattern)` with TTL-based staleness. Nothing is persisted;
//! the cache lives as long as the process.

pub mod clock;
pub mod entry;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::{CacheEntry, CacheKey};
pub use store::{CacheStats, ListingCache, DEFAULT_TTL_SECONDS};
