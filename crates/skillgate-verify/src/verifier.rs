//! Pipeline orchestration: the four gates run in sequence.

use std::sync::Arc;
use std::time::Duration;

use crate::error::VerifyError;
use crate::fetcher::{ChainFetcher, HttpChainFetcher};
use crate::policy::TrustPolicy;
use crate::{chain, chain_url, signature, timestamp};

/// Default timeout for the chain fetch.
const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Authenticates inbound requests against a [`TrustPolicy`].
///
/// Each call to [`verify`](Self::verify) is independent; the only shared
/// state is the fetcher's HTTP client. Gates run in order (chain URL,
/// timestamp, chain fetch and validation, body signature) and the first
/// failure aborts the request. In particular, no network access happens for
/// a request whose chain URL or timestamp is rejected.
pub struct RequestVerifier {
    policy: TrustPolicy,
    fetcher: Arc<dyn ChainFetcher>,
}

impl RequestVerifier {
    /// Create a verifier backed by an [`HttpChainFetcher`] with the default
    /// fetch timeout.
    ///
    /// # Errors
    ///
    /// Returns the underlying client construction error if the TLS backend
    /// cannot be initialized.
    pub fn new(policy: TrustPolicy) -> Result<Self, reqwest::Error> {
        Ok(Self::with_fetcher(
            policy,
            Arc::new(HttpChainFetcher::new(DEFAULT_FETCH_TIMEOUT)?),
        ))
    }

    /// Create a verifier with a caller-supplied fetcher.
    #[must_use]
    pub fn with_fetcher(policy: TrustPolicy, fetcher: Arc<dyn ChainFetcher>) -> Self {
        Self { policy, fetcher }
    }

    /// The policy this verifier enforces.
    #[must_use]
    pub fn policy(&self) -> &TrustPolicy {
        &self.policy
    }

    /// Run all four gates over one buffered request.
    ///
    /// `chain_url` and `signature_b64` are the raw header values;
    /// `body` is the exact byte content of the request body.
    ///
    /// # Errors
    ///
    /// Returns the [`VerifyError`] of the first gate that fails. Errors are
    /// terminal; nothing is retried.
    pub async fn verify(
        &self,
        chain_url: &str,
        signature_b64: &str,
        body: &[u8],
    ) -> Result<(), VerifyError> {
        let url = chain_url::validate(chain_url, &self.policy)?;
        timestamp::validate(body, self.policy.max_skew_secs)?;
        let payload = self.fetcher.fetch(url.as_str()).await?;
        let leaf_key = chain::validate(&payload, &self.policy.verify_hostname)?;
        signature::verify(signature_b64, &leaf_key, body)
    }
}
