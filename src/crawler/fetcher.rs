//! HTTP fetcher implementation
//!
//! This module builds the HTTP client and performs the single live GET the
//! driver issues per iteration, classifying the response into the fetch
//! error taxonomy: hard 404, soft-404 body, other non-2xx, transport error.

use crate::config::CrawlerConfig;
use crate::FetchError;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Builds an HTTP client with the configured user agent and timeouts
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &CrawlerConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.request_timeout))
        .connect_timeout(Duration::from_secs(config.request_timeout))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Performs a live GET for a page body
///
/// # Response handling
///
/// | Condition | Result |
/// |-----------|--------|
/// | HTTP 404 | `FetchError::NotFound` (recorded permanently by the driver) |
/// | Body contains the soft-404 marker | `FetchError::SoftNotFound` |
/// | Other non-2xx | `FetchError::Status` (entry skipped, retried next run) |
/// | Transport failure | `FetchError::Network` |
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
/// * `not_found_marker` - The site's soft-404 marker phrase
///
/// # Returns
///
/// The page body on success
pub async fn fetch_live(
    client: &Client,
    url: &str,
    not_found_marker: &str,
) -> Result<String, FetchError> {
    let response = client.get(url).send().await?;
    let status = response.status();

    if status == StatusCode::NOT_FOUND {
        return Err(FetchError::NotFound(url.to_string()));
    }

    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.text().await?;

    if body.contains(not_found_marker) {
        return Err(FetchError::SoftNotFound(url.to_string()));
    }

    Ok(body)
}
