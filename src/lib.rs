//! Docrawl: a resumable crawler for version-pinned documentation sites
//!
//! This crate crawls a single documentation site pinned to one language and
//! one version, discovering pages by following in-scope anchor links,
//! persisting every fetched page exactly once, and resuming safely across
//! restarts via a durable work queue in SQLite.

pub mod config;
pub mod crawler;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for docrawl operations
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Closed taxonomy of reasons a discovered link is rejected.
///
/// Every variant is terminal for the link that triggered it: the driver
/// drops the link and continues. Nothing here ever aborts the crawl loop.
#[derive(Debug, Error)]
pub enum LinkError {
    #[error("blank href")]
    BlankUrl,

    #[error("excluded URL: {0}")]
    Excluded(String),

    #[error("non-HTTPS link: {0}")]
    NonHttps(String),

    #[error("link to current page: {0}")]
    LinkToCurrentPage(String),

    #[error("language does not match scope: {0}")]
    LanguageNotMatched(String),

    #[error("version does not match scope: {0}")]
    VersionNotMatched(String),

    #[error("could not resolve href {href:?} on page {page} (element: {element})")]
    Unparseable {
        href: String,
        page: String,
        element: String,
    },
}

/// Errors from fetching a single URL.
///
/// `NotFound` and `SoftNotFound` are permanent: the URL is recorded in the
/// not-found table and never fetched again. `Status` covers every other
/// non-2xx response and is deliberately a separate variant so the driver can
/// skip the entry without marking it processed.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("page not found: {0}")]
    NotFound(String),

    #[error("soft-404 body at {0}")]
    SoftNotFound(String),

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("storage error: {0}")]
    Storage(#[from] storage::StorageError),
}

/// Result type alias for docrawl operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use url::{resolve_href, Scope};
