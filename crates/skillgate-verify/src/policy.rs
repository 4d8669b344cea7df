//! Trust configuration for the verification pipeline.

/// Immutable trust parameters consumed by the verification gates.
///
/// The defaults pin the production platform endpoints; tests substitute
/// their own hostnames and tolerances.
#[derive(Debug, Clone)]
pub struct TrustPolicy {
    /// Hostname the chain URL must point at.
    pub trusted_host: String,
    /// Path prefix the chain URL must carry.
    pub required_path_prefix: String,
    /// DNS name the leaf certificate must be issued for.
    pub verify_hostname: String,
    /// Maximum accepted age of a request's declared timestamp, in seconds.
    pub max_skew_secs: i64,
}

impl Default for TrustPolicy {
    fn default() -> Self {
        Self {
            trusted_host: "s3.amazonaws.com".to_owned(),
            required_path_prefix: "/echo.api/".to_owned(),
            verify_hostname: "echo-api.amazon.com".to_owned(),
            max_skew_secs: 150,
        }
    }
}
