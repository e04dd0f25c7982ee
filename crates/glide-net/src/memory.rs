//! In-Memory Fetcher
//!
//! Serves preloaded pages without touching the network. Used as the test
//! double for the engine's scenario tests; also usable as a fixture server
//! by embedders.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use url::Url;

use crate::{FetchId, FetchStatus, Fetcher, NetError, Response};

/// Fetcher over an in-memory URL → HTML map.
///
/// Clones share state, so a test can keep a handle while the engine owns
/// another. Individual URLs can be held pending or forced to fail.
#[derive(Debug, Clone, Default)]
pub struct MemoryFetcher {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    pages: HashMap<String, String>,
    failing: HashSet<String>,
    held: HashSet<String>,
    in_flight: HashMap<FetchId, String>,
    aborted: Vec<String>,
    log: Vec<String>,
    next_id: u64,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `html` for `url`.
    pub fn set_page(&self, url: &str, html: &str) {
        self.lock().pages.insert(url.to_string(), html.to_string());
    }

    /// Make requests for `url` fail with a network error.
    pub fn fail(&self, url: &str) {
        self.lock().failing.insert(url.to_string());
    }

    /// Keep requests for `url` pending until [`MemoryFetcher::release`].
    pub fn hold(&self, url: &str) {
        self.lock().held.insert(url.to_string());
    }

    /// Let held requests for `url` complete on the next poll.
    pub fn release(&self, url: &str) {
        self.lock().held.remove(url);
    }

    /// Every URL that was started, in order.
    pub fn request_log(&self) -> Vec<String> {
        self.lock().log.clone()
    }

    /// URLs whose requests were aborted before completing.
    pub fn aborted(&self) -> Vec<String> {
        self.lock().aborted.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Fetcher for MemoryFetcher {
    fn start(&mut self, url: &Url) -> FetchId {
        let mut inner = self.lock();
        let id = FetchId(inner.next_id);
        inner.next_id += 1;
        inner.log.push(url.to_string());
        inner.in_flight.insert(id, url.to_string());
        id
    }

    fn poll(&mut self, id: FetchId) -> FetchStatus {
        let mut inner = self.lock();
        let Some(url) = inner.in_flight.get(&id).cloned() else {
            return FetchStatus::Ready(Err(NetError::Aborted));
        };
        if inner.held.contains(&url) {
            return FetchStatus::Pending;
        }
        inner.in_flight.remove(&id);

        if inner.failing.contains(&url) {
            return FetchStatus::Ready(Err(NetError::Network("simulated failure".to_string())));
        }
        match inner.pages.get(&url) {
            Some(html) => FetchStatus::Ready(Ok(Response {
                status: 200,
                headers: vec![("content-type".to_string(), "text/html".to_string())],
                body: html.clone().into_bytes(),
            })),
            None => FetchStatus::Ready(Ok(Response {
                status: 404,
                headers: Vec::new(),
                body: b"not found".to_vec(),
            })),
        }
    }

    fn abort(&mut self, id: FetchId) {
        let mut inner = self.lock();
        if let Some(url) = inner.in_flight.remove(&id) {
            inner.aborted.push(url);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_serves_pages_and_logs_requests() {
        let mut fetcher = MemoryFetcher::new();
        fetcher.set_page("https://site.test/about.html", "<p>About</p>");

        let id = fetcher.start(&url("https://site.test/about.html"));
        match fetcher.poll(id) {
            FetchStatus::Ready(Ok(resp)) => {
                assert!(resp.is_success());
                assert_eq!(resp.text().unwrap(), "<p>About</p>");
            }
            other => panic!("unexpected status: {other:?}"),
        }
        assert_eq!(fetcher.request_log(), vec!["https://site.test/about.html"]);
    }

    #[test]
    fn test_hold_keeps_request_pending() {
        let mut fetcher = MemoryFetcher::new();
        fetcher.set_page("https://site.test/a.html", "<p>A</p>");
        fetcher.hold("https://site.test/a.html");

        let id = fetcher.start(&url("https://site.test/a.html"));
        assert!(matches!(fetcher.poll(id), FetchStatus::Pending));

        fetcher.release("https://site.test/a.html");
        assert!(matches!(fetcher.poll(id), FetchStatus::Ready(Ok(_))));
    }

    #[test]
    fn test_abort_discards_result() {
        let mut fetcher = MemoryFetcher::new();
        fetcher.set_page("https://site.test/a.html", "<p>A</p>");
        let id = fetcher.start(&url("https://site.test/a.html"));
        fetcher.abort(id);

        assert_eq!(fetcher.aborted(), vec!["https://site.test/a.html"]);
        assert!(matches!(
            fetcher.poll(id),
            FetchStatus::Ready(Err(NetError::Aborted))
        ));
    }

    #[test]
    fn test_unknown_page_is_404() {
        let mut fetcher = MemoryFetcher::new();
        let id = fetcher.start(&url("https://site.test/missing.html"));
        match fetcher.poll(id) {
            FetchStatus::Ready(Ok(resp)) => assert_eq!(resp.status, 404),
            other => panic!("unexpected status: {other:?}"),
        }
    }

    #[test]
    fn test_failing_url_errors() {
        let mut fetcher = MemoryFetcher::new();
        fetcher.fail("https://site.test/broken.html");
        let id = fetcher.start(&url("https://site.test/broken.html"));
        assert!(matches!(
            fetcher.poll(id),
            FetchStatus::Ready(Err(NetError::Network(_)))
        ));
    }
}
