//! Gate server configuration loaded from environment variables.

use std::env;
use std::str::FromStr;

use skillgate_verify::policy::TrustPolicy;
use thiserror::Error;

/// Errors during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable holds an unparseable value.
    #[error("invalid value for {var}: {value:?}")]
    Invalid {
        /// The offending variable name.
        var: String,
        /// The raw value found.
        value: String,
    },
}

/// Gate server runtime configuration.
#[derive(Debug, Clone)]
pub struct GateConfig {
    /// TCP address to bind (e.g. `0.0.0.0:8080`).
    pub bind_addr: String,
    /// Timeout for the certificate-chain fetch, in seconds.
    pub chain_fetch_timeout_secs: u64,
    /// Upper bound on buffered request body size, in bytes.
    pub max_body_bytes: usize,
    /// Trust parameters handed to the verifier.
    pub trust: TrustPolicy,
}

impl GateConfig {
    /// Load configuration from environment variables.
    ///
    /// Every variable has a default: `BIND_ADDR`,
    /// `CHAIN_FETCH_TIMEOUT_SECS`, `MAX_BODY_BYTES`, and the trust-policy
    /// overrides `TRUSTED_CHAIN_HOST`, `CHAIN_PATH_PREFIX`,
    /// `VERIFY_HOSTNAME`, `MAX_TIMESTAMP_SKEW_SECS`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a numeric variable does not
    /// parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = TrustPolicy::default();
        Ok(Self {
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_owned()),
            chain_fetch_timeout_secs: parse_var("CHAIN_FETCH_TIMEOUT_SECS", 10)?,
            max_body_bytes: parse_var("MAX_BODY_BYTES", 1024 * 1024)?,
            trust: TrustPolicy {
                trusted_host: env::var("TRUSTED_CHAIN_HOST")
                    .unwrap_or(defaults.trusted_host),
                required_path_prefix: env::var("CHAIN_PATH_PREFIX")
                    .unwrap_or(defaults.required_path_prefix),
                verify_hostname: env::var("VERIFY_HOSTNAME")
                    .unwrap_or(defaults.verify_hostname),
                max_skew_secs: parse_var("MAX_TIMESTAMP_SKEW_SECS", defaults.max_skew_secs)?,
            },
        })
    }
}

/// Read and parse `var`, falling back to `default` when unset.
fn parse_var<T: FromStr>(var: &str, default: T) -> Result<T, ConfigError> {
    match env::var(var) {
        Ok(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
            var: var.to_owned(),
            value: raw,
        }),
        Err(_) => Ok(default),
    }
}
