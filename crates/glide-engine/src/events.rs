//! Engine Events
//!
//! Lifecycle notifications drained by the embedder after each pump. The
//! engine mutates its own document tree directly; everything that has to
//! happen outside that tree (scrolling, running scripts, moving focus,
//! falling back to a real navigation) is surfaced here.

use glide_dom::NodeId;

/// Embedder-facing notification.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    /// A soft navigation began; the exit transition is running.
    TransitionStarted { url: String },
    /// The content region was swapped. Collaborating scripts re-initialize
    /// against the new DOM on this signal.
    ContentReplaced { url: String, title: String },
    /// Scroll the viewport to an absolute offset.
    ScrollTo { x: f32, y: f32 },
    /// Scroll to a same-page anchor.
    ScrollToAnchor { anchor: String },
    /// Run an inline script extracted from the new fragment.
    ExecuteScript { source: String },
    /// Move keyboard focus to this node.
    FocusMoved { target: NodeId },
    /// Show a transient failure notice.
    NoticeShown { message: String },
    /// Soft navigation failed; perform a real full-page navigation.
    FullReloadRequested { url: String },
}
