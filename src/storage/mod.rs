//! Storage module for persisting crawl data
//!
//! This module handles all database operations for the crawler, including:
//! - SQLite database initialization and schema management
//! - Page persistence (one immutable row per fetched URL)
//! - The permanent not-found blacklist
//! - The durable frontier queue and its processed flags
//! - The append-only raw-href diagnostic log

mod cache;
mod schema;
mod sqlite;
mod traits;

pub use cache::UrlSetCache;
pub use schema::initialize_schema;
pub use sqlite::SqliteStorage;
pub use traits::{Storage, StorageError, StorageResult};

use sha2::{Digest, Sha256};

/// A fetched page, stored exactly once per distinct URL.
///
/// Content is immutable after creation; `cleaned_text` belongs to the
/// downstream text-extraction step and stays `None` here.
#[derive(Debug, Clone)]
pub struct PageRecord {
    pub id: i64,
    pub url: String,
    pub html_content: String,
    pub content_hash: String,
    pub cleaned_text: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// A discovered-but-unprocessed URL in the durable work queue.
///
/// Entries are never deleted; they double as the audit trail and the resume
/// point after a restart. `processed` flips false to true exactly once.
#[derive(Debug, Clone)]
pub struct FrontierEntry {
    pub id: i64,
    pub source_page_id: i64,
    pub url: String,
    pub link_element: String,
    pub processed: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// SHA-256 hash of page content, hex-encoded.
///
/// Computed once at page creation for integrity and dedup diagnostics.
pub fn hash_html(html: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(html.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_html_is_stable() {
        assert_eq!(hash_html("<html></html>"), hash_html("<html></html>"));
    }

    #[test]
    fn test_hash_html_differs_by_content() {
        assert_ne!(hash_html("<p>a</p>"), hash_html("<p>b</p>"));
    }

    #[test]
    fn test_hash_html_is_hex_sha256() {
        let h = hash_html("anything");
        assert_eq!(h.len(), 64);
        assert!(h.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
