//! Anchor href resolution
//!
//! Documentation sites mix several kinds of links that a plain relative-URL
//! join cannot handle uniformly: absolute links, Sphinx-style
//! `reference internal` relative links, canonical `/{lang}/stable/` links,
//! bare `contents`/`intro` root links, and `rel="next"` pagination links.
//! Each gets its own resolution rule; the rules are tried in a fixed
//! precedence order and the first match wins.

use crate::url::Scope;
use crate::LinkError;
use url::Url;

/// A single `<a>` element as observed on a fetched page
#[derive(Debug, Clone, Default)]
pub struct Anchor {
    /// The raw href attribute, if present
    pub href: Option<String>,

    /// CSS classes on the anchor
    pub classes: Vec<String>,

    /// Tokens of the rel attribute
    pub rel: Vec<String>,

    /// The serialized element, kept for the frontier audit trail
    pub element: String,
}

impl Anchor {
    fn has_classes(&self, a: &str, b: &str) -> bool {
        self.classes.iter().any(|c| c == a) && self.classes.iter().any(|c| c == b)
    }

    fn rel_contains(&self, token: &str) -> bool {
        self.rel.iter().any(|r| r == token)
    }
}

/// Resolves an anchor's href against the current page into a canonical
/// in-scope absolute URL.
///
/// # Arguments
///
/// * `anchor` - The anchor element (href, classes, rel)
/// * `page_url` - The resolved URL of the page the anchor was found on
/// * `scope` - Domain/language/version constraints
///
/// # Returns
///
/// * `Ok(Some(url))` - Canonical absolute URL, scope-validated, fragment stripped
/// * `Ok(None)` - Not a page link at all (mailto and the like); skip silently
/// * `Err(LinkError)` - The specific reason the link is rejected
pub fn resolve_href(
    anchor: &Anchor,
    page_url: &str,
    scope: &Scope,
) -> Result<Option<String>, LinkError> {
    let href = match anchor.href.as_deref() {
        Some(h) if !h.is_empty() => h,
        _ => return Err(LinkError::BlankUrl),
    };

    if href.contains("releases") {
        return Err(LinkError::Excluded(href.to_string()));
    }

    if href.starts_with("mailto:") || href.contains("contributing@") {
        return Ok(None);
    }

    if href.starts_with("http://") {
        return Err(LinkError::NonHttps(href.to_string()));
    }

    if href.starts_with("https://") {
        scope.validate(href)?;
        return Ok(Some(strip_fragment(href)));
    }

    if href.starts_with('#') {
        return Err(LinkError::LinkToCurrentPage(href.to_string()));
    }

    if anchor.has_classes("reference", "internal") {
        let full = climb_segments(page_url, href);
        scope.validate(&full)?;
        return Ok(Some(strip_fragment(&full)));
    }

    let trimmed = href.trim_matches('/');
    if trimmed == "contents" || trimmed == "intro" {
        let full = format!("{}/{}", scope.docs_root_url(), href.trim_start_matches('/'));
        scope.validate(&full)?;
        return Ok(Some(strip_fragment(&full)));
    }

    let stable_prefix = format!("/{}/stable/", scope.language());
    if let Some(suffix) = href.strip_prefix(&stable_prefix) {
        let full = format!("{}/{}", scope.docs_root_url(), suffix);
        scope.validate(&full)?;
        return Ok(Some(strip_fragment(&full)));
    }

    if href.starts_with("..") {
        let full = climb_segments(page_url, href);
        scope.validate(&full)?;
        return Ok(Some(strip_fragment(&full)));
    }

    if anchor.rel_contains("next") {
        // Pagination links follow ordinary relative-URL semantics
        let base = Url::parse(page_url).map_err(|_| unparseable(anchor, href, page_url))?;
        let joined = base
            .join(href)
            .map_err(|_| unparseable(anchor, href, page_url))?;
        let full = joined.to_string();
        scope.validate(&full)?;
        return Ok(Some(strip_fragment(&full)));
    }

    Err(unparseable(anchor, href, page_url))
}

fn unparseable(anchor: &Anchor, href: &str, page_url: &str) -> LinkError {
    LinkError::Unparseable {
        href: href.to_string(),
        page: page_url.to_string(),
        element: anchor.element.clone(),
    }
}

/// Removes the fragment (everything from `#` on) from a URL string
fn strip_fragment(url: &str) -> String {
    url.split('#').next().unwrap_or(url).to_string()
}

/// Resolves a `../`-prefixed href by popping path segments off the current
/// page URL.
///
/// The current page path loses its trailing slash, then one trailing segment
/// per `../` prefix in the href; the remaining segments (with a trailing
/// slash restored) become the base the rest of the href is appended to.
///
/// Example: page `.../gis/install/geolibs/` with href `../blah/` pops one
/// segment and yields `.../gis/install/blah/`.
fn climb_segments(page_url: &str, href: &str) -> String {
    let base = page_url.strip_suffix('/').unwrap_or(page_url);
    let mut segments: Vec<&str> = base.split('/').collect();

    let mut rest = href;
    while let Some(stripped) = rest.strip_prefix("../") {
        segments.pop();
        rest = stripped;
    }

    format!("{}/{}", segments.join("/"), rest)
}
