//! HTTP fetch capability.

use crate::error::HttpError;
use async_trait::async_trait;
use std::time::Duration;

/// Per-request timeout for location lookups. Expiry is treated as a failed
/// lookup and the resolver advances to the next source.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Plain text-fetching capability consumed by the location resolver.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Fetches the body of `url` as text.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, timeout, non-2xx status, or
    /// an empty body.
    async fn fetch_text(&self, url: &str) -> Result<String, HttpError>;
}

/// Production client backed by reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    http: reqwest::Client,
}

impl ReqwestClient {
    /// Creates a client with the standard lookup timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying client cannot be constructed.
    pub fn new() -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { http })
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn fetch_text(&self, url: &str) -> Result<String, HttpError> {
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(HttpError::Status {
                code: status.as_u16(),
            });
        }

        let body = response.text().await?;
        if body.is_empty() {
            return Err(HttpError::EmptyBody);
        }
        Ok(body)
    }
}
