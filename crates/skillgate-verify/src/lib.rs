//! Request authentication for voice-assistant webhook requests.
//!
//! Inbound requests carry a certificate-chain URL header, a signature header,
//! and a JSON body with a declared timestamp. [`verifier::RequestVerifier`]
//! runs four gates over them (chain-URL validation, timestamp staleness,
//! certificate-chain validation, body signature verification) and rejects
//! the request if any gate fails.
#![deny(warnings, clippy::all, clippy::pedantic)]
#![warn(missing_docs)]

pub mod chain;
pub mod chain_url;
pub mod error;
pub mod fetcher;
pub mod policy;
pub mod signature;
pub mod timestamp;
pub mod verifier;

/// Header carrying the URL of the signing certificate chain.
pub const CHAIN_URL_HEADER: &str = "SignatureCertChainUrl";

/// Header carrying the base64-encoded body signature.
pub const SIGNATURE_HEADER: &str = "Signature";
