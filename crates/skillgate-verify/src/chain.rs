//! Second gate: certificate-chain decoding and trust validation.
//!
//! The fetched payload is expected to carry the signing (leaf) certificate
//! first, followed by the intermediates and the root it chains to. The trust
//! pool is built from that same payload: validation walks issuer links until
//! it reaches a self-issued, self-verifying root. The leaf itself never
//! terminates the walk, so a bare self-signed certificate is rejected.

use chrono::Utc;
use rsa::{BigUint, RsaPublicKey};
use x509_parser::pem::Pem;
use x509_parser::prelude::{FromDer, GeneralName, X509Certificate};
use x509_parser::public_key::PublicKey;

use crate::error::VerifyError;

/// Issuer hops allowed before the walk gives up.
const MAX_CHAIN_DEPTH: usize = 8;

/// Validate a fetched PEM chain payload and return the leaf's RSA key.
///
/// The leaf must be within its validity window, carry `verify_hostname`
/// among its SAN DNS names, and chain to a self-issued root whose signature
/// verifies, through certificates found in the same payload, each within
/// its own validity window.
///
/// # Errors
///
/// Returns [`VerifyError::ChainDecodeFailed`] when the payload does not
/// decode into certificates or the leaf key is not RSA, and
/// [`VerifyError::ChainVerifyFailed`] when trust validation fails.
pub fn validate(payload: &[u8], verify_hostname: &str) -> Result<RsaPublicKey, VerifyError> {
    let ders = decode_pem_certs(payload)?;
    let mut certs = Vec::with_capacity(ders.len());
    for der in &ders {
        let (_, cert) = X509Certificate::from_der(der).map_err(|e| {
            VerifyError::ChainDecodeFailed(format!("could not parse certificate: {e}"))
        })?;
        certs.push(cert);
    }

    let now = Utc::now().timestamp();
    let leaf = &certs[0];
    check_validity(leaf, now)?;
    if !has_dns_name(leaf, verify_hostname) {
        return Err(VerifyError::ChainVerifyFailed(format!(
            "certificate is not issued for {verify_hostname}"
        )));
    }

    let mut used = vec![false; certs.len()];
    used[0] = true;
    let mut current = leaf;
    for _ in 0..MAX_CHAIN_DEPTH {
        let issuer_raw = current.issuer().as_raw();
        let next = certs.iter().enumerate().find(|(i, candidate)| {
            !used[*i]
                && candidate.subject().as_raw() == issuer_raw
                && current
                    .verify_signature(Some(candidate.public_key()))
                    .is_ok()
        });
        let Some((i, issuer)) = next else {
            return Err(VerifyError::ChainVerifyFailed(
                "issuer certificate not found in fetched payload".to_owned(),
            ));
        };
        used[i] = true;
        check_validity(issuer, now)?;
        if is_self_issued(issuer) && issuer.verify_signature(None).is_ok() {
            return leaf_rsa_key(leaf);
        }
        current = issuer;
    }

    Err(VerifyError::ChainVerifyFailed(format!(
        "no trusted root within {MAX_CHAIN_DEPTH} certificates"
    )))
}

/// Extract the DER contents of every PEM `CERTIFICATE` block.
fn decode_pem_certs(payload: &[u8]) -> Result<Vec<Vec<u8>>, VerifyError> {
    let mut ders = Vec::new();
    for block in Pem::iter_from_buffer(payload) {
        let pem = block
            .map_err(|e| VerifyError::ChainDecodeFailed(format!("bad PEM block: {e}")))?;
        if pem.label == "CERTIFICATE" {
            ders.push(pem.contents);
        }
    }
    if ders.is_empty() {
        return Err(VerifyError::ChainDecodeFailed(
            "no certificates in payload".to_owned(),
        ));
    }
    Ok(ders)
}

fn check_validity(cert: &X509Certificate<'_>, now: i64) -> Result<(), VerifyError> {
    let not_before = cert.validity().not_before.timestamp();
    let not_after = cert.validity().not_after.timestamp();
    if now < not_before || now > not_after {
        return Err(VerifyError::ChainVerifyFailed(format!(
            "certificate for {} is outside its validity window",
            cert.subject()
        )));
    }
    Ok(())
}

fn is_self_issued(cert: &X509Certificate<'_>) -> bool {
    cert.subject().as_raw() == cert.issuer().as_raw()
}

/// Whether the certificate's SAN DNS names cover `hostname`.
fn has_dns_name(cert: &X509Certificate<'_>, hostname: &str) -> bool {
    let hostname = hostname.to_ascii_lowercase();
    let Ok(Some(san)) = cert.subject_alternative_name() else {
        return false;
    };
    san.value.general_names.iter().any(|name| match name {
        GeneralName::DNSName(pattern) => dns_matches(&pattern.to_ascii_lowercase(), &hostname),
        _ => false,
    })
}

/// Match a SAN DNS entry against a hostname, honoring a left-most wildcard.
fn dns_matches(pattern: &str, hostname: &str) -> bool {
    if let Some(suffix) = pattern.strip_prefix("*.") {
        match hostname.split_once('.') {
            Some((label, rest)) => !label.is_empty() && rest == suffix,
            None => false,
        }
    } else {
        pattern == hostname
    }
}

fn leaf_rsa_key(leaf: &X509Certificate<'_>) -> Result<RsaPublicKey, VerifyError> {
    match leaf.public_key().parsed() {
        Ok(PublicKey::RSA(key)) => RsaPublicKey::new(
            BigUint::from_bytes_be(key.modulus),
            BigUint::from_bytes_be(key.exponent),
        )
        .map_err(|e| VerifyError::ChainDecodeFailed(format!("invalid RSA public key: {e}"))),
        Ok(_) => Err(VerifyError::ChainDecodeFailed(
            "leaf public key is not RSA".to_owned(),
        )),
        Err(e) => Err(VerifyError::ChainDecodeFailed(format!(
            "could not parse leaf public key: {e}"
        ))),
    }
}
