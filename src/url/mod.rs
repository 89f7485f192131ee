//! URL handling module for docrawl
//!
//! This module decides whether discovered links are followed: `scope` holds
//! the pure domain/language/version predicates, `resolver` turns raw anchor
//! hrefs into canonical in-scope absolute URLs.

mod resolver;
mod scope;

pub use resolver::{resolve_href, Anchor};
pub use scope::Scope;
