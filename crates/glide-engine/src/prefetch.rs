//! Prefetcher
//!
//! Debounced, best-effort background fetches triggered by hover/focus.
//! Failures are dropped with a log line; the primary navigation path never
//! depends on a prefetch completing.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use glide_net::{FetchId, FetchStatus, Fetcher};
use url::Url;

use crate::cache::{CacheEntry, FetchCache};
use crate::link;
use crate::page::PageParts;

/// Hover-driven speculative fetcher.
#[derive(Debug)]
pub struct Prefetcher {
    debounce: Duration,
    origin: Url,
    /// URL to deadline after which the fetch starts.
    scheduled: HashMap<String, Instant>,
    /// In-flight prefetches keyed by URL, so the same URL is never fetched
    /// twice concurrently.
    in_flight: HashMap<String, FetchId>,
}

impl Prefetcher {
    /// Create a prefetcher bound to the document origin.
    pub fn new(debounce: Duration, origin: Url) -> Self {
        Self {
            debounce,
            origin,
            scheduled: HashMap::new(),
            in_flight: HashMap::new(),
        }
    }

    /// Request a speculative fetch of `url`. Re-scheduling the same URL
    /// resets its debounce deadline, which coalesces rapid hover movement.
    /// Cross-origin and non-http(s) URLs are ignored.
    pub fn schedule(&mut self, url: &Url, now: Instant) {
        if !matches!(url.scheme(), "http" | "https") || !link::same_origin(url, &self.origin) {
            tracing::debug!(url = %url, "ignoring cross-origin prefetch");
            return;
        }
        let key = link::canonicalize(url).to_string();
        if self.in_flight.contains_key(&key) {
            return;
        }
        self.scheduled.insert(key, now + self.debounce);
    }

    /// Start due fetches and collect finished ones into the cache.
    pub fn tick<F: Fetcher>(
        &mut self,
        now: Instant,
        fetcher: &mut F,
        cache: &mut FetchCache,
        region_id: &str,
    ) {
        let due: Vec<String> = self
            .scheduled
            .iter()
            .filter(|(_, deadline)| now >= **deadline)
            .map(|(url, _)| url.clone())
            .collect();
        for key in due {
            self.scheduled.remove(&key);
            if cache.contains(&key) || self.in_flight.contains_key(&key) {
                continue;
            }
            let Ok(url) = Url::parse(&key) else {
                continue;
            };
            let id = fetcher.start(&url);
            tracing::debug!(url = %key, "prefetching");
            self.in_flight.insert(key, id);
        }

        let polling: Vec<(String, FetchId)> = self
            .in_flight
            .iter()
            .map(|(k, v)| (k.clone(), *v))
            .collect();
        for (key, id) in polling {
            match fetcher.poll(id) {
                FetchStatus::Pending => {}
                FetchStatus::Ready(Ok(resp)) if resp.is_success() => {
                    self.in_flight.remove(&key);
                    let Ok(raw_html) = resp.text() else {
                        tracing::debug!(url = %key, "dropping unreadable prefetch");
                        continue;
                    };
                    match PageParts::from_html(&raw_html, region_id) {
                        Ok(parts) => {
                            // First writer wins; a navigator result that
                            // landed earlier stays authoritative.
                            cache.put(CacheEntry {
                                url: key.clone(),
                                raw_html,
                                title: parts.title,
                                fragment_html: parts.fragment_html,
                            });
                            tracing::debug!(url = %key, "prefetch cached");
                        }
                        Err(err) => {
                            tracing::debug!(url = %key, %err, "dropping unparseable prefetch");
                        }
                    }
                }
                FetchStatus::Ready(Ok(resp)) => {
                    self.in_flight.remove(&key);
                    tracing::debug!(url = %key, status = resp.status, "dropping failed prefetch");
                }
                FetchStatus::Ready(Err(err)) => {
                    self.in_flight.remove(&key);
                    tracing::debug!(url = %key, %err, "dropping failed prefetch");
                }
            }
        }
    }

    /// Whether a prefetch for the canonical `url` is scheduled or in flight.
    pub fn is_pending(&self, url: &str) -> bool {
        self.scheduled.contains_key(url) || self.in_flight.contains_key(url)
    }

    /// Drop scheduled (not yet started) prefetches.
    pub fn clear(&mut self) {
        self.scheduled.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glide_net::MemoryFetcher;

    const PAGE: &str = r#"<html><head><title>About</title></head>
        <body><div id="main-content"><p>About</p></div></body></html>"#;

    fn setup() -> (Prefetcher, MemoryFetcher, FetchCache) {
        let origin = Url::parse("https://site.test/index.html").unwrap();
        let fetcher = MemoryFetcher::new();
        fetcher.set_page("https://site.test/about.html", PAGE);
        (
            Prefetcher::new(Duration::from_millis(65), origin),
            fetcher,
            FetchCache::new(),
        )
    }

    fn about() -> Url {
        Url::parse("https://site.test/about.html").unwrap()
    }

    #[test]
    fn test_debounce_delays_start() {
        let (mut prefetcher, mut fetcher, mut cache) = setup();
        let now = Instant::now();

        prefetcher.schedule(&about(), now);
        prefetcher.tick(now, &mut fetcher, &mut cache, "main-content");
        assert!(fetcher.request_log().is_empty());

        prefetcher.tick(
            now + Duration::from_millis(100),
            &mut fetcher,
            &mut cache,
            "main-content",
        );
        assert_eq!(fetcher.request_log().len(), 1);
        assert!(cache.contains("https://site.test/about.html"));
        assert_eq!(
            cache.get("https://site.test/about.html").unwrap().title,
            "About"
        );
    }

    #[test]
    fn test_reschedule_resets_deadline() {
        let (mut prefetcher, mut fetcher, mut cache) = setup();
        let now = Instant::now();

        prefetcher.schedule(&about(), now);
        // Hovering again just before the deadline pushes it out.
        let later = now + Duration::from_millis(60);
        prefetcher.schedule(&about(), later);

        prefetcher.tick(
            now + Duration::from_millis(100),
            &mut fetcher,
            &mut cache,
            "main-content",
        );
        assert!(fetcher.request_log().is_empty());

        prefetcher.tick(
            later + Duration::from_millis(100),
            &mut fetcher,
            &mut cache,
            "main-content",
        );
        assert_eq!(fetcher.request_log().len(), 1);
    }

    #[test]
    fn test_in_flight_url_is_not_duplicated() {
        let (mut prefetcher, mut fetcher, mut cache) = setup();
        fetcher.hold("https://site.test/about.html");
        let now = Instant::now();

        prefetcher.schedule(&about(), now);
        prefetcher.tick(
            now + Duration::from_millis(100),
            &mut fetcher,
            &mut cache,
            "main-content",
        );
        assert!(prefetcher.is_pending("https://site.test/about.html"));

        // A second hover while the fetch is pending must not start another.
        prefetcher.schedule(&about(), now + Duration::from_millis(120));
        prefetcher.tick(
            now + Duration::from_millis(300),
            &mut fetcher,
            &mut cache,
            "main-content",
        );
        assert_eq!(fetcher.request_log().len(), 1);
    }

    #[test]
    fn test_cross_origin_is_ignored() {
        let (mut prefetcher, mut fetcher, mut cache) = setup();
        let now = Instant::now();

        let other = Url::parse("https://other.test/page.html").unwrap();
        prefetcher.schedule(&other, now);
        prefetcher.tick(
            now + Duration::from_millis(100),
            &mut fetcher,
            &mut cache,
            "main-content",
        );
        assert!(fetcher.request_log().is_empty());
    }

    #[test]
    fn test_failure_is_swallowed() {
        let (mut prefetcher, mut fetcher, mut cache) = setup();
        fetcher.fail("https://site.test/about.html");
        let now = Instant::now();

        prefetcher.schedule(&about(), now);
        prefetcher.tick(
            now + Duration::from_millis(100),
            &mut fetcher,
            &mut cache,
            "main-content",
        );
        assert!(cache.is_empty());
        assert!(!prefetcher.is_pending("https://site.test/about.html"));
    }

    #[test]
    fn test_cached_url_is_not_refetched() {
        let (mut prefetcher, mut fetcher, mut cache) = setup();
        cache.put(CacheEntry {
            url: "https://site.test/about.html".to_string(),
            raw_html: PAGE.to_string(),
            title: "About".to_string(),
            fragment_html: "<p>About</p>".to_string(),
        });
        let now = Instant::now();

        prefetcher.schedule(&about(), now);
        prefetcher.tick(
            now + Duration::from_millis(100),
            &mut fetcher,
            &mut cache,
            "main-content",
        );
        assert!(fetcher.request_log().is_empty());
    }
}
