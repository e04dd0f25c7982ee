//! Fetcher Seam
//!
//! Poll-based request handles. `start` never blocks; callers poll until a
//! terminal status arrives or they abort the handle.

use crate::{NetError, Response};
use url::Url;

/// Handle for an in-flight request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FetchId(pub u64);

/// Poll outcome for a request handle.
#[derive(Debug)]
pub enum FetchStatus {
    /// Still in flight.
    Pending,
    /// Finished; the handle is consumed.
    Ready(Result<Response, NetError>),
}

/// A pollable HTTP GET source.
///
/// Implementations must not block in `start` or `poll`. Polling an unknown
/// or aborted handle yields `Ready(Err(NetError::Aborted))`.
pub trait Fetcher {
    /// Begin fetching `url`.
    fn start(&mut self, url: &Url) -> FetchId;

    /// Poll a handle. `Ready` consumes it.
    fn poll(&mut self, id: FetchId) -> FetchStatus;

    /// Drop an in-flight request. Its result, if any, is discarded.
    fn abort(&mut self, id: FetchId);
}
