//! Glide Networking
//!
//! Same-origin HTML fetching behind a poll-based [`Fetcher`] seam, so the
//! navigation engine stays a deterministically tickable state machine.

mod fetcher;
mod http;
mod memory;

pub use fetcher::{FetchId, FetchStatus, Fetcher};
pub use http::HttpFetcher;
pub use memory::MemoryFetcher;
pub use url::Url;

/// HTTP Response
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Response {
    /// Check if the status is 2xx.
    pub fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Get body as text.
    pub fn text(&self) -> Result<String, NetError> {
        String::from_utf8(self.body.clone()).map_err(|e| NetError::Network(e.to_string()))
    }
}

/// Network error
#[derive(Debug, Clone, thiserror::Error)]
pub enum NetError {
    #[error("HTTP error: {status}")]
    Http { status: u16 },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Request aborted")]
    Aborted,
}
