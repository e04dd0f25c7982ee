//! Lazy Image Loading
//!
//! Tracks deferred images (`data-src`) within the active content region and
//! promotes them when the embedder reports visibility.

use std::collections::HashSet;

use glide_dom::{Document, NodeId};

/// Marker attribute carrying the deferred image source.
pub const DEFERRED_SRC_ATTR: &str = "data-src";

/// Deferred-image tracker scoped to the current content region.
#[derive(Debug, Default)]
pub struct LazyLoader {
    observed: HashSet<NodeId>,
}

impl LazyLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the observed set with the deferred images under `region`.
    /// Returns how many are being watched.
    pub fn rearm(&mut self, doc: &Document, region: NodeId) -> usize {
        self.observed.clear();
        for node in doc.elements_by_tag(region, "img") {
            if doc
                .element(node)
                .is_some_and(|el| el.has_attr(DEFERRED_SRC_ATTR))
            {
                self.observed.insert(node);
            }
        }
        self.observed.len()
    }

    /// Whether `node` is being watched.
    pub fn is_observed(&self, node: NodeId) -> bool {
        self.observed.contains(&node)
    }

    /// Number of watched images.
    pub fn len(&self) -> usize {
        self.observed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observed.is_empty()
    }

    /// Promote a visible image: `data-src` becomes `src`. Returns false for
    /// nodes that are not watched.
    pub fn mark_visible(&mut self, doc: &mut Document, node: NodeId) -> bool {
        if !self.observed.remove(&node) {
            return false;
        }
        let Some(el) = doc.element_mut(node) else {
            return false;
        };
        if let Some(src) = el.attr(DEFERRED_SRC_ATTR).map(str::to_string) {
            el.set_attr("src", &src);
            el.remove_attr(DEFERRED_SRC_ATTR);
        }
        true
    }
}
