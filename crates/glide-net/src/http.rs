//! HTTP Fetcher
//!
//! Blocking reqwest GETs on worker threads, one per request, with results
//! delivered over channels so `poll` never blocks the caller.

use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use url::Url;

use crate::{FetchId, FetchStatus, Fetcher, NetError, Response};

/// Network-backed fetcher.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
    next_id: u64,
    pending: HashMap<FetchId, Receiver<Result<Response, NetError>>>,
}

impl HttpFetcher {
    /// Create a fetcher with the default user agent.
    pub fn new() -> Self {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("glide/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| reqwest::blocking::Client::new());
        Self {
            client,
            next_id: 1,
            pending: HashMap::new(),
        }
    }

    /// Number of requests currently in flight.
    pub fn in_flight(&self) -> usize {
        self.pending.len()
    }
}

impl Fetcher for HttpFetcher {
    fn start(&mut self, url: &Url) -> FetchId {
        let id = FetchId(self.next_id);
        self.next_id += 1;

        tracing::debug!(url = %url, "starting fetch");

        let (tx, rx) = mpsc::channel();
        let client = self.client.clone();
        let url = url.clone();
        thread::spawn(move || {
            let result = client
                .get(url.as_str())
                .send()
                .map_err(|e| NetError::Network(e.to_string()))
                .and_then(|resp| {
                    let status = resp.status().as_u16();
                    let headers = resp
                        .headers()
                        .iter()
                        .map(|(k, v)| {
                            (k.as_str().to_string(), v.to_str().unwrap_or_default().to_string())
                        })
                        .collect();
                    let body = resp.bytes().map_err(|e| NetError::Network(e.to_string()))?;
                    Ok(Response {
                        status,
                        headers,
                        body: body.to_vec(),
                    })
                });
            // Receiver may be gone when the request was aborted.
            let _ = tx.send(result);
        });

        self.pending.insert(id, rx);
        id
    }

    fn poll(&mut self, id: FetchId) -> FetchStatus {
        let Some(rx) = self.pending.get(&id) else {
            return FetchStatus::Ready(Err(NetError::Aborted));
        };
        match rx.try_recv() {
            Ok(result) => {
                self.pending.remove(&id);
                FetchStatus::Ready(result)
            }
            Err(TryRecvError::Empty) => FetchStatus::Pending,
            Err(TryRecvError::Disconnected) => {
                self.pending.remove(&id);
                FetchStatus::Ready(Err(NetError::Network("worker disconnected".to_string())))
            }
        }
    }

    fn abort(&mut self, id: FetchId) {
        if self.pending.remove(&id).is_some() {
            tracing::debug!(id = id.0, "aborted fetch");
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}
