//! Chain fetcher trait and `reqwest`-backed implementation.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use log::debug;

use crate::error::VerifyError;

/// Boxed future returned by dyn-compatible async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Retrieves the PEM certificate chain from a pre-validated URL.
pub trait ChainFetcher: Send + Sync {
    /// Fetch the raw chain payload from `url`.
    ///
    /// # Errors
    ///
    /// Returns [`VerifyError::FetchFailed`] on any transport failure,
    /// timeout, or non-success HTTP status. Fetches are never retried.
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Vec<u8>, VerifyError>>;
}

/// `reqwest`-backed implementation of [`ChainFetcher`].
#[derive(Debug, Clone)]
pub struct HttpChainFetcher {
    http: Arc<reqwest::Client>,
}

impl HttpChainFetcher {
    /// Create a fetcher whose requests abort after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns the underlying client construction error if the TLS backend
    /// cannot be initialized.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self {
            http: Arc::new(reqwest::Client::builder().timeout(timeout).build()?),
        })
    }
}

impl ChainFetcher for HttpChainFetcher {
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Vec<u8>, VerifyError>> {
        Box::pin(async move {
            debug!("fetching certificate chain from {url}");
            let response = self
                .http
                .get(url)
                .send()
                .await
                .map_err(|e| VerifyError::FetchFailed(e.to_string()))?
                .error_for_status()
                .map_err(|e| VerifyError::FetchFailed(e.to_string()))?;

            let bytes = response
                .bytes()
                .await
                .map_err(|e| VerifyError::FetchFailed(e.to_string()))?;

            Ok(bytes.to_vec())
        })
    }
}
