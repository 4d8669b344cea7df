//! First gate: vetting of the caller-supplied certificate-chain URL.

use url::Url;

use crate::error::VerifyError;
use crate::policy::TrustPolicy;

/// Validate a certificate-chain URL against the trust policy.
///
/// All checks are mandatory and short-circuit: the URL must parse, use the
/// `https` scheme, point at the trusted distribution host (exactly, when an
/// explicit non-default port is present; by case-insensitive prefix
/// otherwise), and carry the required path prefix. No network access happens
/// here, so a rejected URL is never fetched.
///
/// # Errors
///
/// Returns [`VerifyError::InvalidChainUrl`] naming the first failed check.
pub fn validate(raw: &str, policy: &TrustPolicy) -> Result<Url, VerifyError> {
    let url = Url::parse(raw)
        .map_err(|e| VerifyError::InvalidChainUrl(format!("could not parse {raw:?}: {e}")))?;

    if url.scheme() != "https" {
        return Err(VerifyError::InvalidChainUrl(format!(
            "scheme is not https: {:?}",
            url.scheme()
        )));
    }

    let host = url
        .host_str()
        .ok_or_else(|| VerifyError::InvalidChainUrl("missing host".to_owned()))?;

    // `Url` strips a default `:443`, so a present port is always non-default.
    if let Some(port) = url.port() {
        if port != 443 || !host.eq_ignore_ascii_case(&policy.trusted_host) {
            return Err(VerifyError::InvalidChainUrl(format!(
                "invalid host or port: {host}:{port}"
            )));
        }
    }

    if !host
        .to_ascii_lowercase()
        .starts_with(&policy.trusted_host.to_ascii_lowercase())
    {
        return Err(VerifyError::InvalidChainUrl(format!(
            "invalid host: {host:?}"
        )));
    }

    if !url.path().starts_with(&policy.required_path_prefix) {
        return Err(VerifyError::InvalidChainUrl(format!(
            "invalid path: {:?}",
            url.path()
        )));
    }

    Ok(url)
}
