//! Lazily-refreshed URL-set caches over the persistent store
//!
//! The crawl loop consults the sets of fetched, not-found, and enqueued URLs
//! on every iteration; re-querying SQLite each time would dominate the loop.
//! Each cache holds a snapshot and a dirty flag: reads reload from the store
//! only when the flag is set, and every write that could change the set
//! flips the flag. Strict consistency is unnecessary because the crawl loop
//! is single-threaded and the only writer.

use crate::storage::StorageResult;
use std::collections::HashSet;

/// An invalidatable snapshot of a set of URLs
#[derive(Debug)]
pub struct UrlSetCache {
    invalidated: bool,
    cached: HashSet<String>,
}

impl UrlSetCache {
    /// Creates a cache that will load on first read
    pub fn new() -> Self {
        Self {
            invalidated: true,
            cached: HashSet::new(),
        }
    }

    /// Marks the snapshot stale; the next read reloads it
    pub fn invalidate(&mut self) {
        self.invalidated = true;
    }

    /// Returns the cached set, reloading via `reload` only when stale
    pub fn get_all<F>(&mut self, reload: F) -> StorageResult<&HashSet<String>>
    where
        F: FnOnce() -> StorageResult<HashSet<String>>,
    {
        if self.invalidated {
            self.cached = reload()?;
            self.invalidated = false;
        }
        Ok(&self.cached)
    }

    /// Membership test against the (possibly reloaded) snapshot
    pub fn contains<F>(&mut self, url: &str, reload: F) -> StorageResult<bool>
    where
        F: FnOnce() -> StorageResult<HashSet<String>>,
    {
        Ok(self.get_all(reload)?.contains(url))
    }
}

impl Default for UrlSetCache {
    fn default() -> Self {
        Self::new()
    }
}
