//! SQLite storage implementation
//!
//! This module provides the SQLite-based implementation of the Storage trait.

use crate::storage::schema::initialize_schema;
use crate::storage::traits::{Storage, StorageResult};
use crate::storage::{FrontierEntry, PageRecord};
use crate::CrawlError;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashSet;
use std::path::Path;

/// SQLite storage backend
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Creates a new SqliteStorage instance
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteStorage)` - Successfully opened/created database
    /// * `Err(CrawlError)` - Failed to open database
    pub fn new(path: &Path) -> Result<Self, CrawlError> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database (for testing)
    #[cfg(test)]
    pub fn new_in_memory() -> Result<Self, CrawlError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    fn row_to_page(row: &rusqlite::Row<'_>) -> rusqlite::Result<PageRecord> {
        Ok(PageRecord {
            id: row.get(0)?,
            url: row.get(1)?,
            html_content: row.get(2)?,
            content_hash: row.get(3)?,
            cleaned_text: row.get(4)?,
            created_at: row.get(5)?,
            updated_at: row.get(6)?,
        })
    }

    fn row_to_frontier_entry(row: &rusqlite::Row<'_>) -> rusqlite::Result<FrontierEntry> {
        Ok(FrontierEntry {
            id: row.get(0)?,
            source_page_id: row.get(1)?,
            url: row.get(2)?,
            link_element: row.get(3)?,
            processed: row.get::<_, i64>(4)? != 0,
            created_at: row.get(5)?,
            updated_at: row.get(6)?,
        })
    }
}

const PAGE_COLUMNS: &str =
    "id, url, html_content, content_hash, cleaned_text, created_at, updated_at";

const FRONTIER_COLUMNS: &str =
    "id, source_page_id, url, link_element, processed, created_at, updated_at";

impl Storage for SqliteStorage {
    // ===== Pages =====

    fn page_exists(&self, url: &str) -> StorageResult<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM pages WHERE url = ?1",
            params![url],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn get_page_by_url(&self, url: &str) -> StorageResult<Option<PageRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {} FROM pages WHERE url = ?1", PAGE_COLUMNS))?;

        let page = stmt
            .query_row(params![url], Self::row_to_page)
            .optional()?;

        Ok(page)
    }

    fn create_page(&mut self, url: &str, html: &str, hash: &str) -> StorageResult<PageRecord> {
        let now = Utc::now().to_rfc3339();

        // Content is immutable: a second insert for the same URL is a no-op
        // and the original row is returned.
        self.conn.execute(
            "INSERT OR IGNORE INTO pages (url, html_content, content_hash, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![url, html, hash, now, now],
        )?;

        self.get_page_by_url(url)?
            .ok_or_else(|| crate::storage::StorageError::PageNotFound(url.to_string()))
    }

    fn all_fetched_urls(&self) -> StorageResult<HashSet<String>> {
        let mut stmt = self.conn.prepare("SELECT url FROM pages")?;
        let urls = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<HashSet<_>, _>>()?;
        Ok(urls)
    }

    fn count_pages(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM pages", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    // ===== Not-found blacklist =====

    fn not_found_exists(&self, url: &str) -> StorageResult<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM not_found_urls WHERE url = ?1",
            params![url],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn record_not_found(&mut self, url: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT OR IGNORE INTO not_found_urls (url) VALUES (?1)",
            params![url],
        )?;
        Ok(())
    }

    fn all_not_found_urls(&self) -> StorageResult<HashSet<String>> {
        let mut stmt = self.conn.prepare("SELECT url FROM not_found_urls")?;
        let urls = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<HashSet<_>, _>>()?;
        Ok(urls)
    }

    fn count_not_found(&self) -> StorageResult<u64> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM not_found_urls", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    // ===== Frontier =====

    fn frontier_contains(&self, url: &str) -> StorageResult<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM frontier WHERE url = ?1",
            params![url],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn enqueue_frontier(
        &mut self,
        source_page_id: i64,
        url: &str,
        link_element: &str,
    ) -> StorageResult<()> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT OR IGNORE INTO frontier (source_page_id, url, link_element, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![source_page_id, url, link_element, now, now],
        )?;
        Ok(())
    }

    fn next_unprocessed_from(&self, min_id: i64) -> StorageResult<Option<FrontierEntry>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM frontier WHERE processed = 0 AND id >= ?1 ORDER BY id LIMIT 1",
            FRONTIER_COLUMNS
        ))?;

        let entry = stmt
            .query_row(params![min_id], Self::row_to_frontier_entry)
            .optional()?;

        Ok(entry)
    }

    fn mark_processed(&mut self, entry_id: i64) -> StorageResult<()> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "UPDATE frontier SET processed = 1, updated_at = ?1 WHERE id = ?2",
            params![now, entry_id],
        )?;
        Ok(())
    }

    fn all_frontier_urls(&self) -> StorageResult<HashSet<String>> {
        let mut stmt = self.conn.prepare("SELECT url FROM frontier")?;
        let urls = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<HashSet<_>, _>>()?;
        Ok(urls)
    }

    fn count_frontier(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM frontier", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn count_unprocessed(&self) -> StorageResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM frontier WHERE processed = 0",
            [],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    // ===== Diagnostics =====

    fn log_raw_href(&mut self, href: &str) -> StorageResult<()> {
        self.conn
            .execute("INSERT INTO raw_hrefs (href) VALUES (?1)", params![href])?;
        Ok(())
    }

    // ===== Reset =====

    fn clear_crawl_state(&mut self) -> StorageResult<()> {
        self.conn.execute("DELETE FROM frontier", [])?;
        self.conn.execute("DELETE FROM not_found_urls", [])?;
        Ok(())
    }
}
