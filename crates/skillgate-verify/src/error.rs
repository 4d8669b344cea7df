//! Error taxonomy for the verification pipeline.

use thiserror::Error;

/// Errors that can occur while verifying an inbound request.
///
/// Every variant is terminal for the request it belongs to; nothing is
/// retried. Callers log the variant server-side and answer the client with
/// an undifferentiated rejection.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// The certificate-chain URL is not a trusted location.
    #[error("untrusted certificate chain URL: {0}")]
    InvalidChainUrl(String),
    /// The certificate chain could not be fetched.
    #[error("failed to fetch certificate chain: {0}")]
    FetchFailed(String),
    /// The fetched payload did not decode into X.509 certificates.
    #[error("failed to decode certificate chain: {0}")]
    ChainDecodeFailed(String),
    /// The certificate chain did not validate against the trust pool.
    #[error("certificate chain verification failed: {0}")]
    ChainVerifyFailed(String),
    /// The request body could not be read.
    #[error("failed to read request body: {0}")]
    BodyReadFailed(String),
    /// The declared timestamp is missing or unparseable.
    #[error("invalid request timestamp: {0}")]
    TimestampInvalid(String),
    /// The declared timestamp is older than the staleness tolerance.
    #[error("stale request timestamp: age {age_secs}s exceeds tolerance {max_skew_secs}s")]
    TimestampStale {
        /// Seconds elapsed since the declared timestamp.
        age_secs: i64,
        /// Configured staleness tolerance in seconds.
        max_skew_secs: i64,
    },
    /// The signature header did not decode to signature bytes.
    #[error("failed to decode signature: {0}")]
    SignatureDecodeFailed(String),
    /// The signature does not match the body and public key.
    #[error("signature verification failed")]
    SignatureVerifyFailed,
}
