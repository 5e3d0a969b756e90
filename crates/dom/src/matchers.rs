// ABOUTME: Pre-compiled CSS selector cache for the tag selections of a shading pass.
// ABOUTME: Compiles each tag selector once and reuses it across every element access.

use std::collections::HashMap;
use std::sync::RwLock;

use dom_query::Matcher;
use once_cell::sync::Lazy;

/// Thread-safe cache of compiled tag selectors.
///
/// One shading pass re-selects the same handful of tag names many times;
/// compiling each selector once keeps the per-access cost at the lookup.
static MATCHER_CACHE: Lazy<RwLock<HashMap<String, Option<Matcher>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Gets or compiles a selector, caching the result.
///
/// Returns `Some(Matcher)` for a valid selector, `None` for an invalid one;
/// both outcomes are cached.
pub(crate) fn get_or_compile(css: &str) -> Option<Matcher> {
    {
        let cache = MATCHER_CACHE.read().unwrap();
        if let Some(cached) = cache.get(css) {
            return cached.clone();
        }
    }

    let compiled = Matcher::new(css).ok();
    let mut cache = MATCHER_CACHE.write().unwrap();
    // Another thread may have inserted while we compiled.
    if let Some(cached) = cache.get(css) {
        return cached.clone();
    }
    cache.insert(css.to_string(), compiled.clone());
    compiled
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_selector_compiles_and_caches() {
        assert!(get_or_compile("iframe").is_some());
        assert!(get_or_compile("iframe").is_some());
    }

    #[test]
    fn test_invalid_selector_is_cached_as_none() {
        assert!(get_or_compile("[[[nope").is_none());
        assert!(get_or_compile("[[[nope").is_none());
    }
}
