use crate::config::types::{Config, CrawlerConfig, OutputConfig, SiteConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_crawler_config(&config.crawler)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the site configuration
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let parsed = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    // http is tolerated so local mock servers can be crawled in tests
    if parsed.scheme() != "https" && parsed.scheme() != "http" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url must use http(s), got scheme '{}'",
            parsed.scheme()
        )));
    }

    if parsed.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(
            "base-url has no host".to_string(),
        ));
    }

    if config.base_url.ends_with('/') {
        return Err(ConfigError::Validation(
            "base-url must not end with a slash".to_string(),
        ));
    }

    if config.language.is_empty() || config.language.contains('/') {
        return Err(ConfigError::Validation(format!(
            "language must be a single path segment, got '{}'",
            config.language
        )));
    }

    if config.version.is_empty() || config.version.contains('/') {
        return Err(ConfigError::Validation(format!(
            "version must be a single path segment, got '{}'",
            config.version
        )));
    }

    if config.not_found_marker.is_empty() {
        return Err(ConfigError::Validation(
            "not-found-marker cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.request_timeout < 1 {
        return Err(ConfigError::Validation(format!(
            "request-timeout must be >= 1s, got {}s",
            config.request_timeout
        )));
    }

    if config.user_agent.is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.database_path.is_empty() {
        return Err(ConfigError::Validation(
            "database-path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        Config {
            site: SiteConfig {
                base_url: "https://docs.djangoproject.com".to_string(),
                language: "en".to_string(),
                version: "6.0".to_string(),
                not_found_marker: "bad link".to_string(),
            },
            crawler: CrawlerConfig {
                request_timeout: 10,
                fetch_delay: 1000,
                user_agent: "docrawl-test/0.1".to_string(),
            },
            output: OutputConfig {
                database_path: "./test.db".to_string(),
            },
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let mut config = valid_config();
        config.site.base_url = "ftp://docs.example.com".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_rejects_trailing_slash_on_base_url() {
        let mut config = valid_config();
        config.site.base_url = "https://docs.djangoproject.com/".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_rejects_empty_language() {
        let mut config = valid_config();
        config.site.language = String::new();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_rejects_multi_segment_version() {
        let mut config = valid_config();
        config.site.version = "6.0/extra".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_rejects_empty_marker() {
        let mut config = valid_config();
        config.site.not_found_marker = String::new();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let mut config = valid_config();
        config.crawler.request_timeout = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_rejects_empty_database_path() {
        let mut config = valid_config();
        config.output.database_path = String::new();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_fetch_delay_is_allowed() {
        let mut config = valid_config();
        config.crawler.fetch_delay = 0;
        assert!(validate(&config).is_ok());
    }
}
