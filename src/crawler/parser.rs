//! HTML parser for extracting anchor elements
//!
//! The crawler only cares about `<a>` tags: their href, CSS classes, and rel
//! tokens drive link resolution, and the serialized element is stored with
//! each frontier entry as the audit trail.

use crate::url::Anchor;
use scraper::{Html, Selector};

/// Extracts every anchor element from an HTML document
///
/// Anchors without an href attribute are included (the resolver rejects them
/// as blank); the raw-href log records what was actually observed.
///
/// # Arguments
///
/// * `html` - The HTML content to parse
///
/// # Returns
///
/// All `<a>` elements in document order
pub fn extract_anchors(html: &str) -> Vec<Anchor> {
    let document = Html::parse_document(html);

    let mut anchors = Vec::new();
    if let Ok(selector) = Selector::parse("a") {
        for element in document.select(&selector) {
            let value = element.value();
            anchors.push(Anchor {
                href: value.attr("href").map(str::to_string),
                classes: value.classes().map(str::to_string).collect(),
                rel: value
                    .attr("rel")
                    .map(|r| r.split_whitespace().map(str::to_string).collect())
                    .unwrap_or_default(),
                element: element.html(),
            });
        }
    }

    anchors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_single_anchor() {
        let html = r#"<html><body><a href="/page">Link</a></body></html>"#;
        let anchors = extract_anchors(html);
        assert_eq!(anchors.len(), 1);
        assert_eq!(anchors[0].href.as_deref(), Some("/page"));
    }

    #[test]
    fn test_extract_classes_and_rel() {
        let html = r#"<a class="reference internal" rel="next prev" href="../x/">x</a>"#;
        let anchors = extract_anchors(html);
        assert_eq!(anchors.len(), 1);
        assert_eq!(anchors[0].classes, vec!["reference", "internal"]);
        assert_eq!(anchors[0].rel, vec!["next", "prev"]);
    }

    #[test]
    fn test_anchor_without_href_is_kept() {
        let html = r#"<a name="section">Section</a>"#;
        let anchors = extract_anchors(html);
        assert_eq!(anchors.len(), 1);
        assert!(anchors[0].href.is_none());
    }

    #[test]
    fn test_serialized_element_preserved() {
        let html = r#"<html><body><a href="/page">Link</a></body></html>"#;
        let anchors = extract_anchors(html);
        assert!(anchors[0].element.contains(r#"href="/page""#));
        assert!(anchors[0].element.contains("Link"));
    }

    #[test]
    fn test_multiple_anchors_in_document_order() {
        let html = r#"
            <html><body>
                <a href="/one">1</a>
                <a href="/two">2</a>
                <a href="/three">3</a>
            </body></html>
        "#;
        let anchors = extract_anchors(html);
        let hrefs: Vec<_> = anchors.iter().filter_map(|a| a.href.as_deref()).collect();
        assert_eq!(hrefs, vec!["/one", "/two", "/three"]);
    }

    #[test]
    fn test_no_anchors() {
        let html = r#"<html><body><p>plain text</p></body></html>"#;
        assert!(extract_anchors(html).is_empty());
    }
}
