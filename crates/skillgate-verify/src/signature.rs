//! Fourth gate: RSA signature verification over the raw body bytes.
//!
//! The platform signs the SHA-1 digest of the exact body bytes with
//! PKCS#1 v1.5 padding. SHA-1 is fixed by the wire protocol and must not be
//! upgraded unilaterally.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use rsa::pkcs1v15::{Signature, VerifyingKey};
use rsa::signature::Verifier;
use rsa::RsaPublicKey;
use sha1::Sha1;

use crate::error::VerifyError;

/// Verify the base64 `signature` header against `body` and `public_key`.
///
/// # Errors
///
/// Returns [`VerifyError::SignatureDecodeFailed`] when the header is not
/// valid base64 or not a well-formed signature, and
/// [`VerifyError::SignatureVerifyFailed`] when the signature does not match
/// the body.
pub fn verify(
    signature_b64: &str,
    public_key: &RsaPublicKey,
    body: &[u8],
) -> Result<(), VerifyError> {
    let raw = STANDARD
        .decode(signature_b64)
        .map_err(|e| VerifyError::SignatureDecodeFailed(e.to_string()))?;
    let signature = Signature::try_from(raw.as_slice())
        .map_err(|e| VerifyError::SignatureDecodeFailed(e.to_string()))?;

    VerifyingKey::<Sha1>::new(public_key.clone())
        .verify(body, &signature)
        .map_err(|_| VerifyError::SignatureVerifyFailed)
}

#[cfg(test)]
mod tests {
    use rsa::pkcs1v15::SigningKey;
    use rsa::signature::{SignatureEncoding, Signer};
    use rsa::RsaPrivateKey;

    use super::*;

    fn keypair() -> (RsaPrivateKey, RsaPublicKey) {
        let mut rng = rand::thread_rng();
        let private = RsaPrivateKey::new(&mut rng, 2048).unwrap();
        let public = private.to_public_key();
        (private, public)
    }

    fn sign(private: &RsaPrivateKey, body: &[u8]) -> String {
        let key = SigningKey::<Sha1>::new(private.clone());
        STANDARD.encode(key.sign(body).to_bytes())
    }

    #[test]
    fn valid_signature_passes() {
        let (private, public) = keypair();
        let body = b"{\"request\":{}}";
        assert!(verify(&sign(&private, body), &public, body).is_ok());
    }

    #[test]
    fn flipped_body_byte_is_rejected() {
        let (private, public) = keypair();
        let body = b"{\"request\":{}}".to_vec();
        let sig = sign(&private, &body);
        let mut tampered = body;
        tampered[1] ^= 0x01;
        let err = verify(&sig, &public, &tampered).unwrap_err();
        assert!(matches!(err, VerifyError::SignatureVerifyFailed));
    }

    #[test]
    fn wrong_key_is_rejected() {
        let (private, _) = keypair();
        let (_, other_public) = keypair();
        let body = b"payload";
        assert!(verify(&sign(&private, body), &other_public, body).is_err());
    }

    #[test]
    fn invalid_base64_is_rejected() {
        let (_, public) = keypair();
        let err = verify("%%not-base64%%", &public, b"body").unwrap_err();
        assert!(matches!(err, VerifyError::SignatureDecodeFailed(_)));
    }
}
