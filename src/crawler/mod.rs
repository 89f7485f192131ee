//! Crawler module: fetching, parsing, and the crawl loop
//!
//! This module contains the crawl machinery:
//! - HTTP fetching with not-found classification
//! - HTML anchor extraction
//! - The driver loop over the persistent frontier

mod driver;
mod fetcher;
mod parser;

pub use driver::{CrawlState, Driver};
pub use fetcher::{build_http_client, fetch_live};
pub use parser::extract_anchors;

use crate::config::Config;
use crate::storage::{SqliteStorage, Storage};
use crate::CrawlError;
use std::path::Path;

/// Runs a complete crawl
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Open (or create) the SQLite database from the configuration
/// 2. Optionally clear frontier and not-found state for a fresh pass
/// 3. Build the driver and run the loop until the frontier is empty
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `seed` - Seed URL override; defaults to the versioned docs root
/// * `fresh` - Clear frontier and not-found state before crawling
///
/// # Returns
///
/// * `Ok(())` - Crawl completed
/// * `Err(CrawlError)` - Setup or storage failure
pub async fn run_crawl(config: Config, seed: Option<String>, fresh: bool) -> Result<(), CrawlError> {
    let mut storage = SqliteStorage::new(Path::new(&config.output.database_path))?;

    if fresh {
        tracing::info!("Clearing frontier and not-found state");
        storage.clear_crawl_state()?;
    }

    let mut driver = Driver::new(&config, storage, seed)?;
    driver.run().await?;

    let storage = driver.into_storage();
    tracing::info!(
        "Stored pages: {}, frontier entries: {}, not found: {}",
        storage.count_pages()?,
        storage.count_frontier()?,
        storage.count_not_found()?
    );

    Ok(())
}
