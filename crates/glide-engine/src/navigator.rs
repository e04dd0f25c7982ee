//! Navigator
//!
//! The soft-navigation state machine: intercepts link activations, fetches
//! the destination (cache first), swaps the content region, maintains
//! history, and drives the progress bar and post-swap initialization.
//!
//! The machine advances on [`Navigator::tick`]; every wait is a polled fetch
//! or a fixed-duration deadline, so the embedder's clock fully determines
//! behavior.

use std::time::Instant;

use glide_dom::{Document, NodeId, serialize};
use glide_net::{FetchId, FetchStatus, Fetcher};
use url::Url;

use crate::EngineError;
use crate::cache::{CacheEntry, FetchCache};
use crate::config::EngineConfig;
use crate::events::PageEvent;
use crate::forms;
use crate::history::{History, HistoryEntry};
use crate::init::Initializer;
use crate::lazy::LazyLoader;
use crate::link::{self, LinkAction};
use crate::page::PageParts;
use crate::prefetch::Prefetcher;
use crate::progress::ProgressBar;

/// Navigation lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Listening for link activations.
    Idle,
    /// Exit transition running.
    Exiting,
    /// Waiting on the primary fetch.
    Fetching,
    /// Applying the fetched fragment. Transient within a single tick.
    Swapping,
    /// Entrance transition running.
    Entering,
}

/// A navigation in progress. At most one exists; a newer navigation aborts
/// and replaces it.
#[derive(Debug)]
struct PendingNav {
    url: Url,
    fetch: Option<FetchId>,
    deadline: Instant,
    /// Present on history traversals: the offset to restore, and the signal
    /// not to push a new entry.
    restore_scroll: Option<(f32, f32)>,
    entry: Option<CacheEntry>,
}

/// Soft-navigation engine over an embedder-supplied fetcher.
pub struct Navigator<F: Fetcher> {
    config: EngineConfig,
    fetcher: F,
    cache: FetchCache,
    prefetcher: Prefetcher,
    progress: ProgressBar,
    history: History,
    init: Initializer,
    document: Document,
    region: NodeId,
    current_url: Url,
    title: String,
    scroll: (f32, f32),
    phase: Phase,
    pending: Option<PendingNav>,
    enter_deadline: Option<Instant>,
    events: Vec<PageEvent>,
}

impl<F: Fetcher> Navigator<F> {
    /// Create an engine over the initial page. The initial document is
    /// seeded into the cache so history traversal back to it needs no fetch.
    pub fn new(
        config: EngineConfig,
        fetcher: F,
        url: &str,
        html: &str,
    ) -> Result<Self, EngineError> {
        let parsed = Url::parse(url).map_err(|e| EngineError::InvalidUrl(e.to_string()))?;
        let current_url = link::canonicalize(&parsed);
        let document = glide_html::parse(html);
        let region = document
            .element_by_id(&config.region_id)
            .ok_or_else(|| EngineError::MissingRegion(config.region_id.clone()))?;

        let title = document.title().unwrap_or_default();
        let mut cache = FetchCache::new();
        cache.put(CacheEntry {
            url: current_url.to_string(),
            raw_html: html.to_string(),
            title: title.clone(),
            fragment_html: serialize::inner_html(&document, region),
        });

        let mut nav = Self {
            prefetcher: Prefetcher::new(config.prefetch_debounce, current_url.clone()),
            progress: ProgressBar::new(config.progress_fade),
            history: History::new(current_url.as_str()),
            init: Initializer::new(),
            document,
            region,
            current_url,
            title,
            scroll: (0.0, 0.0),
            phase: Phase::Idle,
            pending: None,
            enter_deadline: None,
            events: Vec::new(),
            cache,
            fetcher,
            config,
        };
        nav.run_initializer();
        Ok(nav)
    }

    // === Input ===

    /// Handle a click on `target`. Returns true when the engine intercepted
    /// it; false means the browser should handle the click itself.
    pub fn on_click(&mut self, target: NodeId, now: Instant) -> bool {
        match link::classify(&self.document, target, &self.current_url) {
            Some(LinkAction::ScrollToAnchor(anchor)) => {
                let mut with_fragment = self.current_url.clone();
                with_fragment.set_fragment(Some(&anchor));
                self.history.record_scroll(self.scroll);
                self.history.push(with_fragment.as_str());
                self.events.push(PageEvent::ScrollToAnchor { anchor });
                true
            }
            Some(LinkAction::Navigate(url)) => {
                self.begin_navigation(url, None, now);
                true
            }
            None => false,
        }
    }

    /// Handle pointer-over or focus on `target`: schedule a prefetch when it
    /// resolves to an uncached navigable link.
    pub fn on_hover(&mut self, target: NodeId, now: Instant) {
        if let Some(LinkAction::Navigate(url)) =
            link::classify(&self.document, target, &self.current_url)
        {
            if !self.cache.contains(url.as_str()) {
                self.prefetcher.schedule(&url, now);
            }
        }
    }

    /// Traverse history backward. No new entry is pushed.
    pub fn go_back(&mut self, now: Instant) -> bool {
        self.history.record_scroll(self.scroll);
        let Some(entry) = self.history.go_back() else {
            return false;
        };
        self.restore(entry, now);
        true
    }

    /// Traverse history forward. No new entry is pushed.
    pub fn go_forward(&mut self, now: Instant) -> bool {
        self.history.record_scroll(self.scroll);
        let Some(entry) = self.history.go_forward() else {
            return false;
        };
        self.restore(entry, now);
        true
    }

    /// Record the viewport offset reported by the embedder.
    pub fn set_scroll(&mut self, x: f32, y: f32) {
        self.scroll = (x, y);
    }

    // === Pump ===

    /// Advance the machine: progress animation, due prefetches, and the
    /// current navigation phase.
    pub fn tick(&mut self, now: Instant) {
        self.progress.tick(now);
        self.prefetcher.tick(
            now,
            &mut self.fetcher,
            &mut self.cache,
            &self.config.region_id,
        );

        match self.phase {
            Phase::Idle => {}
            Phase::Exiting => self.tick_exiting(now),
            Phase::Fetching => self.tick_fetching(now),
            Phase::Swapping => self.perform_swap(now),
            Phase::Entering => self.tick_entering(now),
        }
    }

    /// Drain events produced since the last call.
    pub fn take_events(&mut self) -> Vec<PageEvent> {
        std::mem::take(&mut self.events)
    }

    // === Embedder surface ===

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Mutable document access, for embedders syncing input state.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn region(&self) -> NodeId {
        self.region
    }

    pub fn current_url(&self) -> &Url {
        &self.current_url
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn cache(&self) -> &FetchCache {
        &self.cache
    }

    /// Drop every cached page.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn progress(&self) -> &ProgressBar {
        &self.progress
    }

    /// Deferred images tracked in the current region.
    pub fn lazy_images(&self) -> &LazyLoader {
        self.init.lazy()
    }

    /// Promote a deferred image the embedder reported visible.
    pub fn mark_image_visible(&mut self, node: NodeId) -> bool {
        self.init.mark_image_visible(&mut self.document, node)
    }

    /// Validate a form bound in the content region.
    pub fn validate_form(&mut self, form: NodeId) -> bool {
        forms::validate_form(&mut self.document, form)
    }

    /// Serialized markup of the content region.
    pub fn content_html(&self) -> String {
        serialize::inner_html(&self.document, self.region)
    }

    // === State machine ===

    fn begin_navigation(&mut self, url: Url, restore_scroll: Option<(f32, f32)>, now: Instant) {
        // A newer navigation supersedes the in-flight one.
        if let Some(prev) = self.pending.take() {
            if let Some(id) = prev.fetch {
                self.fetcher.abort(id);
                tracing::debug!(url = %prev.url, "superseded in-flight navigation");
            }
        }
        self.enter_deadline = None;
        if restore_scroll.is_none() {
            self.history.record_scroll(self.scroll);
        }

        tracing::debug!(url = %url, "starting soft navigation");
        self.progress.show();
        self.events.push(PageEvent::TransitionStarted {
            url: url.to_string(),
        });
        self.pending = Some(PendingNav {
            url,
            fetch: None,
            deadline: now + self.config.exit_duration,
            restore_scroll,
            entry: None,
        });
        self.phase = Phase::Exiting;
    }

    fn restore(&mut self, entry: HistoryEntry, now: Instant) {
        let Ok(target) = Url::parse(&entry.url) else {
            return;
        };
        let canonical = link::canonicalize(&target);
        if canonical == self.current_url {
            // Same document (hash entries): only the scroll differs.
            self.scroll = entry.scroll;
            self.events.push(PageEvent::ScrollTo {
                x: entry.scroll.0,
                y: entry.scroll.1,
            });
            return;
        }
        self.begin_navigation(canonical, Some(entry.scroll), now);
    }

    fn tick_exiting(&mut self, now: Instant) {
        let Some(pending) = self.pending.as_mut() else {
            self.phase = Phase::Idle;
            return;
        };
        if now < pending.deadline {
            return;
        }
        if let Some(entry) = self.cache.get(pending.url.as_str()).cloned() {
            tracing::debug!(url = %pending.url, "serving navigation from cache");
            pending.entry = Some(entry);
            self.progress.set(0.8);
            self.phase = Phase::Swapping;
            self.perform_swap(now);
            return;
        }
        let id = self.fetcher.start(&pending.url);
        pending.fetch = Some(id);
        self.progress.set(0.3);
        self.phase = Phase::Fetching;
    }

    fn tick_fetching(&mut self, now: Instant) {
        let Some(id) = self.pending.as_ref().and_then(|p| p.fetch) else {
            self.phase = Phase::Idle;
            return;
        };
        match self.fetcher.poll(id) {
            FetchStatus::Pending => {
                self.progress.set(0.6);
            }
            FetchStatus::Ready(Ok(resp)) => {
                let Some(url) = self.pending.as_ref().map(|p| p.url.clone()) else {
                    return;
                };
                if !resp.is_success() {
                    self.fail_pending(format!("page returned HTTP {}", resp.status));
                    return;
                }
                let raw_html = match resp.text() {
                    Ok(text) => text,
                    Err(err) => {
                        self.fail_pending(format!("unreadable response: {err}"));
                        return;
                    }
                };
                let parts = match PageParts::from_html(&raw_html, &self.config.region_id) {
                    Ok(parts) => parts,
                    Err(err) => {
                        self.fail_pending(err.to_string());
                        return;
                    }
                };
                let entry = CacheEntry {
                    url: url.to_string(),
                    raw_html,
                    title: parts.title,
                    fragment_html: parts.fragment_html,
                };
                self.cache.put(entry.clone());
                if let Some(pending) = self.pending.as_mut() {
                    pending.entry = Some(entry);
                }
                self.progress.set(0.8);
                self.phase = Phase::Swapping;
                self.perform_swap(now);
            }
            FetchStatus::Ready(Err(err)) => {
                // Superseded fetches were aborted together with their
                // pending navigation, so an error here is genuine.
                self.fail_pending(err.to_string());
            }
        }
    }

    fn perform_swap(&mut self, now: Instant) {
        let Some(pending) = self.pending.take() else {
            self.phase = Phase::Idle;
            return;
        };
        let Some(entry) = pending.entry else {
            self.phase = Phase::Idle;
            return;
        };

        glide_html::parse_fragment_into(&mut self.document, self.region, &entry.fragment_html);
        self.document.set_title(&entry.title);
        self.title = entry.title.clone();
        self.current_url = pending.url.clone();

        match pending.restore_scroll {
            Some((x, y)) => {
                // History traversal: the cursor already moved, no push.
                self.scroll = (x, y);
                self.events.push(PageEvent::ScrollTo { x, y });
            }
            None => {
                self.history.push(entry.url.as_str());
                self.scroll = (0.0, 0.0);
                self.events.push(PageEvent::ScrollTo { x: 0.0, y: 0.0 });
            }
        }

        self.events.push(PageEvent::ContentReplaced {
            url: entry.url.clone(),
            title: entry.title.clone(),
        });
        self.run_initializer();

        self.progress.complete();
        self.enter_deadline = Some(now + self.config.enter_duration);
        self.phase = Phase::Entering;
        tracing::debug!(url = %self.current_url, title = %self.title, "content swapped");
    }

    fn tick_entering(&mut self, now: Instant) {
        if self.enter_deadline.is_some_and(|d| now >= d) {
            self.enter_deadline = None;
            self.phase = Phase::Idle;
            tracing::debug!(url = %self.current_url, "navigation complete");
        }
    }

    fn fail_pending(&mut self, reason: String) {
        let Some(pending) = self.pending.take() else {
            self.phase = Phase::Idle;
            return;
        };
        tracing::warn!(url = %pending.url, %reason, "soft navigation failed, falling back to full reload");
        self.progress.complete();
        self.events.push(PageEvent::NoticeShown {
            message: "Page failed to load, retrying with a full reload".to_string(),
        });
        self.events.push(PageEvent::FullReloadRequested {
            url: pending.url.to_string(),
        });
        self.phase = Phase::Idle;
    }

    fn run_initializer(&mut self) {
        self.init.run(
            &mut self.document,
            self.region,
            &self.current_url,
            &self.config.active_class,
            &mut self.events,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glide_net::MemoryFetcher;

    const INDEX: &str = r#"<html><head><title>Home</title></head>
        <body><div id="main-content"><p>Home</p></div></body></html>"#;

    #[test]
    fn test_missing_region_is_a_construction_error() {
        let result = Navigator::new(
            EngineConfig::default(),
            MemoryFetcher::new(),
            "https://site.test/index.html",
            "<html><body><p>no region</p></body></html>",
        );
        assert!(matches!(result, Err(EngineError::MissingRegion(_))));
    }

    #[test]
    fn test_initial_page_is_cached_and_idle() {
        let nav = Navigator::new(
            EngineConfig::default(),
            MemoryFetcher::new(),
            "https://site.test/index.html",
            INDEX,
        )
        .unwrap();

        assert_eq!(nav.phase(), Phase::Idle);
        assert_eq!(nav.title(), "Home");
        assert!(nav.cache().contains("https://site.test/index.html"));
        assert_eq!(nav.history().len(), 1);
    }

    #[test]
    fn test_invalid_initial_url_is_rejected() {
        let result = Navigator::new(
            EngineConfig::default(),
            MemoryFetcher::new(),
            "not a url",
            INDEX,
        );
        assert!(matches!(result, Err(EngineError::InvalidUrl(_))));
    }
}
