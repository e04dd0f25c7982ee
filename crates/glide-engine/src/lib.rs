//! Glide Engine
//!
//! A soft-navigation engine for same-origin sites: it intercepts link
//! activations, fetches the destination HTML (cache first), swaps a
//! designated content region, maintains history with scroll restoration,
//! prefetches hovered links, and re-initializes page-local behavior after
//! every swap.
//!
//! The embedder owns the event loop: feed input with [`Navigator::on_click`],
//! [`Navigator::on_hover`], and [`Navigator::go_back`], pump with
//! [`Navigator::tick`], and drain [`Navigator::take_events`] for the side
//! effects to apply (scrolling, script execution, focus, full-page fallback
//! navigation).

pub mod cache;
pub mod config;
pub mod events;
pub mod forms;
pub mod history;
pub mod init;
pub mod lazy;
pub mod link;
pub mod navigator;
pub mod page;
pub mod prefetch;
pub mod progress;

pub use cache::{CacheEntry, FetchCache};
pub use config::EngineConfig;
pub use events::PageEvent;
pub use history::{History, HistoryEntry};
pub use init::Initializer;
pub use lazy::LazyLoader;
pub use link::LinkAction;
pub use navigator::{Navigator, Phase};
pub use page::{PageError, PageParts};
pub use prefetch::Prefetcher;
pub use progress::ProgressBar;

/// Engine construction error
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("content region '{0}' not found")]
    MissingRegion(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}
