//! Link Classification
//!
//! The capability check applied to a click target's ancestor chain: is this
//! a same-origin link the engine should intercept, a same-page anchor, or
//! something the browser must handle itself.

use glide_dom::{Document, NodeId};
use url::Url;

/// Opt-out attribute: links carrying it always get a full browser navigation.
pub const IGNORE_ATTR: &str = "data-glide-ignore";

/// What a click on a link should do.
#[derive(Debug, Clone, PartialEq)]
pub enum LinkAction {
    /// Soft-navigate to this canonical URL.
    Navigate(Url),
    /// Scroll to a same-page anchor.
    ScrollToAnchor(String),
}

/// Strip the fragment. Cache keys and history comparisons use this form.
pub fn canonicalize(url: &Url) -> Url {
    let mut out = url.clone();
    out.set_fragment(None);
    out
}

/// Compare scheme/host/port.
pub fn same_origin(a: &Url, b: &Url) -> bool {
    a.origin() == b.origin()
}

/// Nearest enclosing anchor element, starting at `target` itself.
pub fn find_anchor(doc: &Document, target: NodeId) -> Option<NodeId> {
    doc.ancestors(target)
        .into_iter()
        .find(|&n| doc.element(n).is_some_and(|el| el.tag == "a"))
}

/// Decide what a click on `target` should do, or `None` for clicks the
/// engine must leave to the browser.
pub fn classify(doc: &Document, target: NodeId, current: &Url) -> Option<LinkAction> {
    let anchor = find_anchor(doc, target)?;
    let el = doc.element(anchor)?;

    if el.has_attr(IGNORE_ATTR) || el.has_attr("download") {
        return None;
    }
    if el
        .attr("target")
        .is_some_and(|t| t.eq_ignore_ascii_case("_blank"))
    {
        return None;
    }

    let href = el.attr("href")?;
    let resolved = current.join(href).ok()?;
    if !matches!(resolved.scheme(), "http" | "https") {
        return None;
    }
    if !same_origin(&resolved, current) {
        return None;
    }

    let canonical = canonicalize(&resolved);
    if canonical == canonicalize(current) {
        // Same document: a fragment means scroll, anything else is a no-op.
        return resolved
            .fragment()
            .map(|f| LinkAction::ScrollToAnchor(f.to_string()));
    }
    Some(LinkAction::Navigate(canonical))
}
