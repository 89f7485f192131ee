//! Scope validation for absolute URLs
//!
//! A URL is in scope when it lives under the configured base domain, its
//! first path segment matches the pinned language, and the next segment
//! starts with the pinned version. All checks are pure; any failure is
//! terminal for the link that produced the URL.

use crate::config::SiteConfig;
use crate::LinkError;

/// The domain + language + version constraints a URL must satisfy
#[derive(Debug, Clone)]
pub struct Scope {
    base_url: String,
    language: String,
    version: String,
}

impl Scope {
    pub fn new(base_url: &str, language: &str, version: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            language: language.to_string(),
            version: version.to_string(),
        }
    }

    pub fn from_site(site: &SiteConfig) -> Self {
        Self::new(&site.base_url, &site.language, &site.version)
    }

    /// The versioned documentation root, e.g. `https://docs.djangoproject.com/en/6.0`
    pub fn docs_root_url(&self) -> String {
        format!("{}/{}/{}", self.base_url, self.language, self.version)
    }

    /// The language path segment this crawl is pinned to
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Checks domain, language, and version constraints, in that order.
    ///
    /// # Arguments
    ///
    /// * `url` - An absolute URL
    ///
    /// # Returns
    ///
    /// * `Ok(())` - URL is in scope
    /// * `Err(LinkError)` - The first failed constraint
    pub fn validate(&self, url: &str) -> Result<(), LinkError> {
        self.check_not_excluded(url)?;
        self.check_language(url)?;
        self.check_version(url)?;
        Ok(())
    }

    fn check_not_excluded(&self, url: &str) -> Result<(), LinkError> {
        if !url.starts_with(&self.base_url) {
            return Err(LinkError::Excluded(url.to_string()));
        }
        Ok(())
    }

    fn check_language(&self, url: &str) -> Result<(), LinkError> {
        let prefix = format!("{}/", self.base_url);
        let rest = url
            .split(&prefix)
            .nth(1)
            .ok_or_else(|| LinkError::LanguageNotMatched(url.to_string()))?;

        let segment = rest.split('/').next().unwrap_or("");
        if segment != self.language {
            return Err(LinkError::LanguageNotMatched(url.to_string()));
        }
        Ok(())
    }

    fn check_version(&self, url: &str) -> Result<(), LinkError> {
        let prefix = format!("{}/{}/", self.base_url, self.language);
        let rest = url
            .split(&prefix)
            .nth(1)
            .ok_or_else(|| LinkError::VersionNotMatched(url.to_string()))?;

        let segment = rest.split('/').next().unwrap_or("");
        if !segment.starts_with(&self.version) {
            return Err(LinkError::VersionNotMatched(url.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LinkError;

    fn scope() -> Scope {
        Scope::new("https://docs.djangoproject.com", "en", "6.0")
    }

    #[test]
    fn test_in_scope_url() {
        let result = scope().validate("https://docs.djangoproject.com/en/6.0/ref/models/");
        assert!(result.is_ok());
    }

    #[test]
    fn test_docs_root_itself_is_in_scope() {
        assert!(scope()
            .validate("https://docs.djangoproject.com/en/6.0")
            .is_ok());
    }

    #[test]
    fn test_off_domain_url_is_excluded() {
        let result = scope().validate("https://www.djangoproject.com/weblog/");
        assert!(matches!(result, Err(LinkError::Excluded(_))));
    }

    #[test]
    fn test_wrong_language_rejected() {
        let result = scope().validate("https://docs.djangoproject.com/fr/6.0/ref/");
        assert!(matches!(result, Err(LinkError::LanguageNotMatched(_))));
    }

    #[test]
    fn test_wrong_version_rejected() {
        let result = scope().validate("https://docs.djangoproject.com/en/5.2/ref/");
        assert!(matches!(result, Err(LinkError::VersionNotMatched(_))));
    }

    #[test]
    fn test_version_prefix_match_accepted() {
        // "6.0.1" starts with the pinned "6.0"
        let result = scope().validate("https://docs.djangoproject.com/en/6.0.1/ref/");
        assert!(result.is_ok());
    }

    #[test]
    fn test_bare_base_url_has_no_language() {
        let result = scope().validate("https://docs.djangoproject.com");
        assert!(matches!(result, Err(LinkError::LanguageNotMatched(_))));
    }

    #[test]
    fn test_domain_check_runs_before_language_check() {
        // An off-domain URL with an /en/ segment must still fail as excluded
        let result = scope().validate("https://other.example.com/en/6.0/");
        assert!(matches!(result, Err(LinkError::Excluded(_))));
    }
}
