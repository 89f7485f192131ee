//! Crawl driver - the main crawl loop
//!
//! The driver ties the fetch cache, frontier, resolver, and scope validator
//! together: it pulls a target (the seed first, then unprocessed frontier
//! entries), fetches it from cache or network, extracts and resolves
//! anchors, enqueues newly discovered in-scope URLs, and marks the entry
//! processed. The loop is single-threaded and every mutation is idempotent
//! or uniqueness-guarded, so an interrupted crawl resumes cleanly from the
//! persistent store.

use crate::config::Config;
use crate::crawler::fetcher::{build_http_client, fetch_live};
use crate::crawler::parser::extract_anchors;
use crate::storage::{hash_html, FrontierEntry, PageRecord, Storage, UrlSetCache};
use crate::url::{resolve_href, Scope};
use crate::{CrawlError, FetchError, LinkError};
use reqwest::Client;
use std::time::Duration;

/// Progress of the crawl loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlState {
    /// Before the first fetch; the next target is the seed URL
    Seed,
    /// Working through the frontier
    Running,
    /// Frontier exhausted; the loop has ended
    Done,
}

enum Target {
    Seed(String),
    Entry(FrontierEntry),
}

/// The crawl driver
///
/// Owns the storage handle and all three URL-set caches; nothing here is
/// global state (spec'd dependencies are passed in at construction).
pub struct Driver<S: Storage> {
    scope: Scope,
    seed_url: String,
    not_found_marker: String,
    fetch_delay: u64,
    storage: S,
    client: Client,
    fetched_cache: UrlSetCache,
    not_found_cache: UrlSetCache,
    frontier_cache: UrlSetCache,
    state: CrawlState,
    // Frontier entries skipped on transient HTTP errors stay unprocessed;
    // the cursor moves past them so they are not retried until the next run.
    cursor: i64,
}

impl<S: Storage> Driver<S> {
    /// Creates a new driver
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    /// * `storage` - The persistent store
    /// * `seed` - Seed URL override; defaults to the versioned docs root
    ///
    /// # Returns
    ///
    /// * `Ok(Driver)` - Ready to run
    /// * `Err(CrawlError)` - Failed to build the HTTP client
    pub fn new(config: &Config, storage: S, seed: Option<String>) -> Result<Self, CrawlError> {
        let scope = Scope::from_site(&config.site);
        let seed_url = seed.unwrap_or_else(|| scope.docs_root_url());
        let client = build_http_client(&config.crawler)?;

        Ok(Self {
            scope,
            seed_url,
            not_found_marker: config.site.not_found_marker.clone(),
            fetch_delay: config.crawler.fetch_delay,
            storage,
            client,
            fetched_cache: UrlSetCache::new(),
            not_found_cache: UrlSetCache::new(),
            frontier_cache: UrlSetCache::new(),
            state: CrawlState::Seed,
            cursor: 0,
        })
    }

    /// The URL the crawl starts from
    pub fn seed_url(&self) -> &str {
        &self.seed_url
    }

    /// Current loop state
    pub fn state(&self) -> CrawlState {
        self.state
    }

    /// Consumes the driver and returns the storage handle
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Runs the crawl loop until the frontier is exhausted
    pub async fn run(&mut self) -> Result<(), CrawlError> {
        tracing::info!("Starting crawl from {}", self.seed_url);

        let mut visited = 0u64;

        loop {
            let target = match self.next_target()? {
                Some(t) => t,
                None => break,
            };

            let (url, entry) = match target {
                Target::Seed(url) => (url, None),
                Target::Entry(entry) => (entry.url.clone(), Some(entry)),
            };

            match self.fetch(&url).await {
                Ok((page, live)) => {
                    self.discover_links(&page, &url)?;
                    if let Some(entry) = &entry {
                        self.storage.mark_processed(entry.id)?;
                    }
                    visited += 1;
                    if live {
                        self.rate_limit_delay().await;
                    }
                }

                // Permanently recorded; the entry is done.
                Err(FetchError::NotFound(_)) | Err(FetchError::SoftNotFound(_)) => {
                    tracing::info!("Page not found: {}", url);
                    if let Some(entry) = &entry {
                        self.storage.mark_processed(entry.id)?;
                    }
                }

                // Transient failures leave the entry unprocessed for the
                // next run; the cursor skips past it for this one.
                Err(FetchError::Status { status, .. }) => {
                    tracing::warn!("HTTP {} for {}, skipping entry", status, url);
                    if let Some(entry) = &entry {
                        self.cursor = entry.id + 1;
                    }
                }
                Err(FetchError::Network(err)) => {
                    tracing::warn!("Network error for {}: {}, skipping entry", url, err);
                    if let Some(entry) = &entry {
                        self.cursor = entry.id + 1;
                    }
                }

                Err(FetchError::Storage(err)) => return Err(err.into()),
            }
        }

        tracing::info!("Crawl complete: {} pages visited", visited);
        Ok(())
    }

    /// Picks the next crawl target: the seed exactly once, then unprocessed
    /// frontier entries until none remain.
    fn next_target(&mut self) -> Result<Option<Target>, CrawlError> {
        match self.state {
            CrawlState::Seed => {
                self.state = CrawlState::Running;
                Ok(Some(Target::Seed(self.seed_url.clone())))
            }
            CrawlState::Running => match self.storage.next_unprocessed_from(self.cursor)? {
                Some(entry) => Ok(Some(Target::Entry(entry))),
                None => {
                    tracing::info!("Frontier exhausted");
                    self.state = CrawlState::Done;
                    Ok(None)
                }
            },
            CrawlState::Done => Ok(None),
        }
    }

    /// Returns the page for a URL, from cache or network.
    ///
    /// The bool is true when a live network fetch happened (and the
    /// rate-limit delay applies).
    async fn fetch(&mut self, url: &str) -> Result<(PageRecord, bool), FetchError> {
        {
            let storage = &self.storage;
            if self
                .fetched_cache
                .contains(url, || storage.all_fetched_urls())?
            {
                if let Some(page) = storage.get_page_by_url(url)? {
                    tracing::debug!("Serving {} from the page store", url);
                    return Ok((page, false));
                }
            }
        }

        {
            let storage = &self.storage;
            if self
                .not_found_cache
                .contains(url, || storage.all_not_found_urls())?
            {
                return Err(FetchError::NotFound(url.to_string()));
            }
        }

        tracing::info!("Fetching {}", url);
        match fetch_live(&self.client, url, &self.not_found_marker).await {
            Ok(body) => {
                let page = self.storage.create_page(url, &body, &hash_html(&body))?;
                self.fetched_cache.invalidate();
                Ok((page, true))
            }
            Err(err @ (FetchError::NotFound(_) | FetchError::SoftNotFound(_))) => {
                self.storage.record_not_found(url)?;
                self.not_found_cache.invalidate();
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    /// Extracts anchors from a fetched page, resolves each against the
    /// scope, and enqueues newly discovered URLs.
    ///
    /// Individual bad links are dropped without surfacing an error.
    fn discover_links(&mut self, page: &PageRecord, page_url: &str) -> Result<(), CrawlError> {
        let anchors = extract_anchors(&page.html_content);
        tracing::debug!("{} anchors on {}", anchors.len(), page_url);

        for anchor in anchors {
            self.storage
                .log_raw_href(anchor.href.as_deref().unwrap_or(""))?;

            let resolved = match resolve_href(&anchor, page_url, &self.scope) {
                Ok(Some(url)) => url,
                Ok(None) => continue,
                Err(err @ LinkError::Unparseable { .. }) => {
                    // Full context for diagnosing new link shapes
                    tracing::warn!("{}", err);
                    continue;
                }
                Err(err) => {
                    tracing::debug!("Dropping link: {}", err);
                    continue;
                }
            };

            // Known-404 URLs are never enqueued
            {
                let storage = &self.storage;
                if self
                    .not_found_cache
                    .contains(&resolved, || storage.all_not_found_urls())?
                {
                    continue;
                }
            }

            {
                let storage = &self.storage;
                if self
                    .frontier_cache
                    .contains(&resolved, || storage.all_frontier_urls())?
                {
                    continue;
                }
            }

            self.storage
                .enqueue_frontier(page.id, &resolved, &anchor.element)?;
            self.frontier_cache.invalidate();
            tracing::debug!("Enqueued {}", resolved);
        }

        Ok(())
    }

    /// Sleeps between live fetches. A zero delay (test configuration)
    /// disables the sleep entirely.
    async fn rate_limit_delay(&self) {
        if self.fetch_delay > 0 {
            tracing::debug!("Sleeping {}ms before next fetch", self.fetch_delay);
            tokio::time::sleep(Duration::from_millis(self.fetch_delay)).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CrawlerConfig, OutputConfig, SiteConfig};
    use crate::storage::SqliteStorage;

    fn test_config() -> Config {
        Config {
            site: SiteConfig {
                base_url: "https://docs.djangoproject.com".to_string(),
                language: "en".to_string(),
                version: "6.0".to_string(),
                not_found_marker: "followed a bad link".to_string(),
            },
            crawler: CrawlerConfig {
                request_timeout: 5,
                fetch_delay: 0,
                user_agent: "docrawl-test/0.1".to_string(),
            },
            output: OutputConfig {
                database_path: ":memory:".to_string(),
            },
        }
    }

    #[test]
    fn test_default_seed_is_docs_root() {
        let storage = SqliteStorage::new_in_memory().unwrap();
        let driver = Driver::new(&test_config(), storage, None).unwrap();
        assert_eq!(driver.seed_url(), "https://docs.djangoproject.com/en/6.0");
        assert_eq!(driver.state(), CrawlState::Seed);
    }

    #[test]
    fn test_explicit_seed_overrides_default() {
        let storage = SqliteStorage::new_in_memory().unwrap();
        let driver = Driver::new(
            &test_config(),
            storage,
            Some("https://docs.djangoproject.com/en/6.0/ref/".to_string()),
        )
        .unwrap();
        assert_eq!(
            driver.seed_url(),
            "https://docs.djangoproject.com/en/6.0/ref/"
        );
    }

    #[tokio::test]
    async fn test_cached_seed_completes_without_network() {
        // Seed page already stored and every frontier entry processed:
        // the run must finish from cache alone.
        let mut storage = SqliteStorage::new_in_memory().unwrap();
        let html = "<html><body>no links</body></html>";
        storage
            .create_page(
                "https://docs.djangoproject.com/en/6.0",
                html,
                &hash_html(html),
            )
            .unwrap();

        let mut driver = Driver::new(&test_config(), storage, None).unwrap();
        driver.run().await.unwrap();

        assert_eq!(driver.state(), CrawlState::Done);
        let storage = driver.into_storage();
        assert_eq!(storage.count_pages().unwrap(), 1);
        assert_eq!(storage.count_frontier().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_cached_pages_discover_links_on_rerun() {
        // A stored seed whose body links in scope still feeds the frontier
        // on a later run, without any network fetch.
        let mut storage = SqliteStorage::new_in_memory().unwrap();
        let html = r#"<a class="reference internal" href="../intro/">intro</a>"#;
        storage
            .create_page(
                "https://docs.djangoproject.com/en/6.0/ref/",
                html,
                &hash_html(html),
            )
            .unwrap();
        // Target of the discovered link is cached too
        storage
            .create_page(
                "https://docs.djangoproject.com/en/6.0/intro/",
                "<html></html>",
                &hash_html("<html></html>"),
            )
            .unwrap();

        let mut driver = Driver::new(
            &test_config(),
            storage,
            Some("https://docs.djangoproject.com/en/6.0/ref/".to_string()),
        )
        .unwrap();
        driver.run().await.unwrap();

        let storage = driver.into_storage();
        assert_eq!(storage.count_frontier().unwrap(), 1);
        assert_eq!(storage.count_unprocessed().unwrap(), 0);
        assert!(storage
            .frontier_contains("https://docs.djangoproject.com/en/6.0/intro/")
            .unwrap());
    }
}
