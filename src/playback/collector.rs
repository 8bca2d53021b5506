//! Recursive file collection with caching and skip filtering.

use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;

use crate::cache::{CacheKey, ListingCache};
use crate::error::{RemoteError, Result};
use crate::gateway::PlayerGateway;
use crate::library::{File, SkipRule};

/// Default bound on directory nesting.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Walks the library through a gateway, memoizing each subtree.
///
/// Every directory visited gets its own cache entry keyed by
/// `(path, skip pattern)`, so a later collection of any subtree is served
/// from the cache. A failed listing anywhere below `path` fails the whole
/// collection and writes no entry for `path` or any ancestor on the way.
pub struct Collector<G: ?Sized> {
    gateway: Arc<G>,
    cache: Arc<ListingCache>,
    excluded: Option<String>,
    max_depth: usize,
}

impl<G: PlayerGateway + ?Sized> Collector<G> {
    /// Create a collector with no excluded substring.
    pub fn new(gateway: Arc<G>, cache: Arc<ListingCache>) -> Self {
        Self {
            gateway,
            cache,
            excluded: None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Always skip paths containing `excluded`.
    pub fn with_excluded_substring(mut self, excluded: Option<String>) -> Self {
        self.excluded = excluded.filter(|s| !s.is_empty());
        self
    }

    /// Fail collections that nest deeper than `max_depth` directories.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// The cache this collector reads and fills.
    pub fn cache(&self) -> &Arc<ListingCache> {
        &self.cache
    }

    /// Build the skip rule for an optional user pattern.
    pub fn skip_rule(&self, skip_pattern: Option<&str>) -> Result<SkipRule> {
        SkipRule::new(skip_pattern, self.excluded.as_deref())
    }

    /// Every file under `path`, minus skipped directories and files.
    ///
    /// Files from a directory come before files from its subdirectories,
    /// and subdirectories are visited in listing order.
    pub async fn collect(&self, path: &str, skip_pattern: Option<&str>) -> Result<Vec<File>> {
        let rule = self.skip_rule(skip_pattern)?;
        self.collect_with(path.to_string(), &rule, Vec::new()).await
    }

    fn collect_with<'a>(
        &'a self,
        path: String,
        rule: &'a SkipRule,
        ancestors: Vec<String>,
    ) -> BoxFuture<'a, Result<Vec<File>>> {
        async move {
            let key = CacheKey::new(path.clone(), rule.pattern());

            if let Some(entry) = self.cache.get_fresh(&key) {
                tracing::debug!("Listing cache hit for '{}'", path);
                return Ok(entry.files.clone());
            }

            if rule.should_skip(&path) {
                tracing::debug!("Skipping '{}'", path);
                return Ok(Vec::new());
            }

            if ancestors.len() >= self.max_depth {
                return Err(RemoteError::TreeTooDeep {
                    path,
                    max_depth: self.max_depth,
                });
            }

            let directory = self.gateway.fetch_directory(&path).await?.decoded();

            let mut chain = ancestors;
            chain.push(path.clone());

            let mut files = directory.files;
            for folder in directory.folders {
                if chain.contains(&folder.path) {
                    tracing::warn!(
                        "Ignoring folder '{}' listed under '{}': it is one of its own ancestors",
                        folder.path,
                        path
                    );
                    continue;
                }
                let nested = self.collect_with(folder.path, rule, chain.clone()).await?;
                files.extend(nested);
            }

            files.retain(|file| !rule.should_skip(&file.path));

            tracing::debug!("Collected {} files under '{}'", files.len(), path);
            self.cache.put(key, files.clone());
            Ok(files)
        }
        .boxed()
    }
}
