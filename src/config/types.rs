use serde::Deserialize;

/// Main configuration structure for docrawl
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub site: SiteConfig,
    pub crawler: CrawlerConfig,
    pub output: OutputConfig,
}

/// The documentation site being crawled
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Base domain URL, no trailing slash (e.g. "https://docs.djangoproject.com")
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Language path segment the crawl is pinned to (e.g. "en")
    pub language: String,

    /// Version path segment prefix the crawl is pinned to (e.g. "6.0")
    pub version: String,

    /// Marker phrase identifying a soft-404 body (HTTP 200 "not found" page)
    #[serde(rename = "not-found-marker")]
    pub not_found_marker: String,
}

impl SiteConfig {
    /// The versioned documentation root, e.g. "https://docs.djangoproject.com/en/6.0".
    ///
    /// This is the default crawl seed and the base for root-relative link
    /// resolution.
    pub fn docs_root_url(&self) -> String {
        format!("{}/{}/{}", self.base_url, self.language, self.version)
    }
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// HTTP request timeout in seconds
    #[serde(rename = "request-timeout")]
    pub request_timeout: u64,

    /// Delay between live network fetches in milliseconds.
    /// Zero disables the delay (test configuration).
    #[serde(rename = "fetch-delay")]
    pub fetch_delay: u64,

    /// User-agent header sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

fn default_user_agent() -> String {
    format!("docrawl/{}", env!("CARGO_PKG_VERSION"))
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the SQLite database file
    #[serde(rename = "database-path")]
    pub database_path: String,
}
