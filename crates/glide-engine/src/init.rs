//! Post-Swap Initialization
//!
//! Re-binds page-local behavior against a freshly inserted content region.
//! Each step is guarded on its own: a broken widget must not keep the other
//! steps from running, and never blocks the navigation itself.

use glide_dom::{Document, NodeId};
use url::Url;

use crate::events::PageEvent;
use crate::forms;
use crate::lazy::LazyLoader;

/// Script types re-executed after a swap.
const SCRIPT_ALLOW_LIST: &[&str] = &["", "text/javascript", "module"];
/// Explicit focus target marker.
pub const FOCUS_ATTR: &str = "data-glide-focus";
/// Entrance animation marker.
pub const REVEAL_ATTR: &str = "data-reveal";

/// Per-step failure, contained at this boundary.
#[derive(Debug, Clone, thiserror::Error)]
pub enum InitError {
    #[error("focus target is not an element")]
    NotAnElement,
}

/// Runs the post-swap steps and carries their cross-swap state.
#[derive(Debug, Default)]
pub struct Initializer {
    lazy: LazyLoader,
    last_focus: Option<NodeId>,
}

impl Initializer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every step against the new region.
    pub fn run(
        &mut self,
        doc: &mut Document,
        region: NodeId,
        current: &Url,
        active_class: &str,
        events: &mut Vec<PageEvent>,
    ) {
        if let Err(err) = self.apply_active_links(doc, current, active_class) {
            tracing::warn!(%err, "active-link step failed");
        }
        if let Err(err) = self.rehydrate_scripts(doc, region, events) {
            tracing::warn!(%err, "script rehydration step failed");
        }
        let armed = self.lazy.rearm(doc, region);
        tracing::debug!(armed, "re-armed deferred images");
        let bound = forms::bind_forms(doc, region);
        if !bound.is_empty() {
            tracing::debug!(count = bound.len(), "bound form validation");
        }
        if let Err(err) = self.stagger_reveals(doc, region) {
            tracing::warn!(%err, "reveal step failed");
        }
        if let Err(err) = self.move_focus(doc, region, events) {
            tracing::warn!(%err, "focus step failed");
        }
    }

    /// The deferred-image tracker for the current region.
    pub fn lazy(&self) -> &LazyLoader {
        &self.lazy
    }

    /// Promote a deferred image the embedder reported visible.
    pub fn mark_image_visible(&mut self, doc: &mut Document, node: NodeId) -> bool {
        self.lazy.mark_visible(doc, node)
    }

    /// Step 1: links whose resolved path matches the new URL get the active
    /// class, everything else loses it. Runs over the whole document since
    /// navigation chrome lives outside the swapped region.
    fn apply_active_links(
        &self,
        doc: &mut Document,
        current: &Url,
        active_class: &str,
    ) -> Result<(), InitError> {
        let current_path = current.path().to_string();
        for anchor in doc.elements_by_tag(doc.root(), "a") {
            let Some(el) = doc.element(anchor) else {
                continue;
            };
            let Some(href) = el.attr("href") else {
                continue;
            };
            let matches_path = current
                .join(href)
                .map(|resolved| {
                    crate::link::same_origin(&resolved, current)
                        && resolved.path() == current_path
                })
                .unwrap_or(false);
            let Some(el) = doc.element_mut(anchor) else {
                continue;
            };
            if matches_path {
                el.add_class(active_class);
            } else {
                el.remove_class(active_class);
            }
        }
        Ok(())
    }

    /// Step 2: inline scripts on the allow-list are surfaced for execution.
    /// Markup insertion alone never runs them.
    fn rehydrate_scripts(
        &self,
        doc: &Document,
        region: NodeId,
        events: &mut Vec<PageEvent>,
    ) -> Result<(), InitError> {
        for script in doc.elements_by_tag(region, "script") {
            let Some(el) = doc.element(script) else {
                continue;
            };
            let kind = el.attr("type").unwrap_or("");
            if !SCRIPT_ALLOW_LIST.contains(&kind) {
                tracing::debug!(kind, "skipping script with non-executable type");
                continue;
            }
            if el.has_attr("src") {
                tracing::debug!("skipping external script in fragment");
                continue;
            }
            let source = doc.text_content(script);
            if !source.trim().is_empty() {
                events.push(PageEvent::ExecuteScript { source });
            }
        }
        Ok(())
    }

    /// Step 5: flagged elements get an incrementing index for CSS-driven
    /// staggered entrances.
    fn stagger_reveals(&self, doc: &mut Document, region: NodeId) -> Result<(), InitError> {
        let flagged = doc.elements_with_attr(region, REVEAL_ATTR);
        for (index, node) in flagged.into_iter().enumerate() {
            if let Some(el) = doc.element_mut(node) {
                el.set_attr("data-reveal-index", &index.to_string());
            }
        }
        Ok(())
    }

    /// Step 6: move focus to the explicit target or the first heading, via a
    /// temporary tab-stop that the next run removes.
    fn move_focus(
        &mut self,
        doc: &mut Document,
        region: NodeId,
        events: &mut Vec<PageEvent>,
    ) -> Result<(), InitError> {
        if let Some(prev) = self.last_focus.take() {
            if let Some(el) = doc.element_mut(prev) {
                if el.attr("tabindex") == Some("-1") {
                    el.remove_attr("tabindex");
                }
            }
        }

        let target = doc
            .elements_with_attr(region, FOCUS_ATTR)
            .into_iter()
            .next()
            .or_else(|| first_heading(doc, region));
        let Some(target) = target else {
            return Ok(());
        };
        let el = doc.element_mut(target).ok_or(InitError::NotAnElement)?;
        if el.attr("tabindex").is_none() {
            el.set_attr("tabindex", "-1");
        }
        self.last_focus = Some(target);
        events.push(PageEvent::FocusMoved { target });
        Ok(())
    }
}

fn first_heading(doc: &Document, region: NodeId) -> Option<NodeId> {
    doc.descendants(region).into_iter().find(|&n| {
        doc.element(n).is_some_and(|el| {
            matches!(el.tag.as_str(), "h1" | "h2" | "h3" | "h4" | "h5" | "h6")
        })
    })
}
