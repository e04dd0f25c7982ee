//! Fetch Cache
//!
//! Canonical-URL-keyed store of fetched pages, shared by navigation and
//! prefetch. Entries are immutable once stored and live for the process
//! lifetime: there is no eviction or revalidation, so a long session grows
//! without bound. `clear` is the only release valve.

use std::collections::HashMap;

/// A fetched, parsed page.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    /// Canonical URL: same-origin, fragment stripped.
    pub url: String,
    /// The raw response body.
    pub raw_html: String,
    /// The fetched document's title.
    pub title: String,
    /// Inner markup of the fetched document's content region.
    pub fragment_html: String,
}

/// In-memory page cache.
#[derive(Debug, Default)]
pub struct FetchCache {
    entries: HashMap<String, CacheEntry>,
}

impl FetchCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a canonical URL.
    pub fn get(&self, url: &str) -> Option<&CacheEntry> {
        self.entries.get(url)
    }

    /// Check for a canonical URL.
    pub fn contains(&self, url: &str) -> bool {
        self.entries.contains_key(url)
    }

    /// Store an entry unless the URL is already present. The first writer
    /// wins; later results for the same URL are discarded.
    pub fn put(&mut self, entry: CacheEntry) {
        self.entries.entry(entry.url.clone()).or_insert(entry);
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of cached pages.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(url: &str, title: &str) -> CacheEntry {
        CacheEntry {
            url: url.to_string(),
            raw_html: format!("<html><title>{title}</title></html>"),
            title: title.to_string(),
            fragment_html: format!("<p>{title}</p>"),
        }
    }

    #[test]
    fn test_put_and_get() {
        let mut cache = FetchCache::new();
        cache.put(entry("https://site.test/about.html", "About"));

        assert!(cache.contains("https://site.test/about.html"));
        let got = cache.get("https://site.test/about.html").unwrap();
        assert_eq!(got.title, "About");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_first_writer_wins() {
        let mut cache = FetchCache::new();
        cache.put(entry("https://site.test/a.html", "First"));
        cache.put(entry("https://site.test/a.html", "Second"));

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("https://site.test/a.html").unwrap().title, "First");
    }

    #[test]
    fn test_clear() {
        let mut cache = FetchCache::new();
        cache.put(entry("https://site.test/a.html", "A"));
        cache.clear();

        assert!(cache.is_empty());
        assert!(!cache.contains("https://site.test/a.html"));
    }
}
