//! Test doubles for the capability traits.
//!
//! These are used by this crate's own tests and are exported so downstream
//! crates can drive the orchestrator without a network or a host page.

use crate::error::HttpError;
use crate::http::HttpClient;
use crate::session::SessionStore;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// HTTP client that replays a scripted sequence of responses and records
/// the URLs it was asked to fetch.
#[derive(Clone)]
pub struct StubHttpClient {
    responses: Arc<Mutex<VecDeque<Result<String, HttpError>>>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StubHttpClient {
    /// Creates a client that answers with `responses` in order; once the
    /// script runs out, every further fetch fails.
    #[must_use]
    pub fn new(responses: Vec<Result<String, HttpError>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses.into())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns the URLs fetched so far, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpClient for StubHttpClient {
    async fn fetch_text(&self, url: &str) -> Result<String, HttpError> {
        self.requests.lock().unwrap().push(url.to_string());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(HttpError::EmptyBody))
    }
}

/// Session probe with a fixed answer.
#[derive(Debug, Clone, Copy)]
pub struct FixedSessionStore(pub bool);

impl SessionStore for FixedSessionStore {
    fn has_session(&self, _site_id: &str) -> bool {
        self.0
    }
}
