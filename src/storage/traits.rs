//! Storage traits and error types
//!
//! This module defines the trait interface for storage backends and
//! associated error types.

use crate::storage::{FrontierEntry, PageRecord};
use std::collections::HashSet;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Page not found: {0}")]
    PageNotFound(String),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for storage backend implementations
///
/// This trait defines all database operations the crawl driver needs. Every
/// insert is uniqueness-guarded: creating a row that already exists is a
/// no-op, never an error.
pub trait Storage {
    // ===== Pages =====

    /// Returns true if a page with this URL has been stored
    fn page_exists(&self, url: &str) -> StorageResult<bool>;

    /// Gets a stored page by URL
    fn get_page_by_url(&self, url: &str) -> StorageResult<Option<PageRecord>>;

    /// Stores a newly fetched page.
    ///
    /// If a page with this URL already exists, the existing row is returned
    /// unchanged; stored content is immutable.
    fn create_page(&mut self, url: &str, html: &str, hash: &str) -> StorageResult<PageRecord>;

    /// All URLs with a stored page
    fn all_fetched_urls(&self) -> StorageResult<HashSet<String>>;

    /// Total number of stored pages
    fn count_pages(&self) -> StorageResult<u64>;

    // ===== Not-found blacklist =====

    /// Returns true if this URL was previously recorded as not found
    fn not_found_exists(&self, url: &str) -> StorageResult<bool>;

    /// Permanently records a 404/soft-404 URL (idempotent)
    fn record_not_found(&mut self, url: &str) -> StorageResult<()>;

    /// All URLs in the not-found blacklist
    fn all_not_found_urls(&self) -> StorageResult<HashSet<String>>;

    /// Number of not-found URLs
    fn count_not_found(&self) -> StorageResult<u64>;

    // ===== Frontier =====

    /// Returns true if this URL was ever enqueued
    fn frontier_contains(&self, url: &str) -> StorageResult<bool>;

    /// Enqueues a newly discovered URL.
    ///
    /// Duplicate URLs are silently ignored (unique constraint).
    fn enqueue_frontier(
        &mut self,
        source_page_id: i64,
        url: &str,
        link_element: &str,
    ) -> StorageResult<()>;

    /// Returns one unprocessed frontier entry, if any
    fn next_unprocessed(&self) -> StorageResult<Option<FrontierEntry>> {
        self.next_unprocessed_from(0)
    }

    /// Returns the first unprocessed frontier entry with `id >= min_id`.
    ///
    /// The driver advances `min_id` past entries it skips on transient HTTP
    /// errors so they are not retried within the same run.
    fn next_unprocessed_from(&self, min_id: i64) -> StorageResult<Option<FrontierEntry>>;

    /// Marks a frontier entry processed (false to true, exactly once)
    fn mark_processed(&mut self, entry_id: i64) -> StorageResult<()>;

    /// All URLs ever enqueued, processed or not
    fn all_frontier_urls(&self) -> StorageResult<HashSet<String>>;

    /// Total number of frontier entries
    fn count_frontier(&self) -> StorageResult<u64>;

    /// Number of frontier entries still unprocessed
    fn count_unprocessed(&self) -> StorageResult<u64>;

    // ===== Diagnostics =====

    /// Appends a raw href attribute to the diagnostic log
    fn log_raw_href(&mut self, href: &str) -> StorageResult<()>;

    // ===== Reset =====

    /// Deletes all frontier and not-found rows. Pages are kept.
    fn clear_crawl_state(&mut self) -> StorageResult<()>;
}
