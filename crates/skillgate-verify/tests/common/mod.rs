//! Shared helpers for skillgate-verify integration tests: throwaway
//! certificate chains, body signing, and canned chain fetchers.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::{Duration, Utc};
use rcgen::{BasicConstraints, CertificateParams, DnType, IsCa, KeyPair, PKCS_RSA_SHA256};
use rsa::pkcs1v15::SigningKey;
use rsa::pkcs8::{EncodePrivateKey, LineEnding};
use rsa::signature::{SignatureEncoding, Signer};
use rsa::RsaPrivateKey;
use sha1::Sha1;
use skillgate_verify::error::VerifyError;
use skillgate_verify::fetcher::{BoxFuture, ChainFetcher};

/// A freshly minted signing chain: PEM blocks plus the leaf's private key.
pub struct TestChain {
    pub leaf_pem: String,
    pub root_pem: Option<String>,
    pub leaf_key: RsaPrivateKey,
}

impl TestChain {
    /// The payload a chain URL would serve: leaf first, then the root.
    pub fn payload(&self) -> Vec<u8> {
        let mut pem = self.leaf_pem.clone();
        if let Some(root) = &self.root_pem {
            pem.push_str(root);
        }
        pem.into_bytes()
    }

    /// The payload with the root withheld.
    pub fn payload_without_root(&self) -> Vec<u8> {
        self.leaf_pem.clone().into_bytes()
    }
}

fn rsa_leaf_keypair() -> (RsaPrivateKey, KeyPair) {
    let mut rng = rand::thread_rng();
    let private = RsaPrivateKey::new(&mut rng, 2048).unwrap();
    let pem = private.to_pkcs8_pem(LineEnding::LF).unwrap();
    let key_pair = KeyPair::from_pem_and_sign_algo(&pem, &PKCS_RSA_SHA256).unwrap();
    (private, key_pair)
}

fn root_ca(common_name: &str) -> (rcgen::Certificate, KeyPair) {
    let key = KeyPair::generate().unwrap();
    let mut params = CertificateParams::new(Vec::<String>::new()).unwrap();
    params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
    params.distinguished_name.push(DnType::CommonName, common_name);
    let cert = params.self_signed(&key).unwrap();
    (cert, key)
}

/// An RSA leaf for `hostname`, signed by a throwaway root CA.
pub fn chained(hostname: &str) -> TestChain {
    let (ca_cert, ca_key) = root_ca("skillgate test root");
    let (leaf_private, leaf_key) = rsa_leaf_keypair();
    let leaf_params = CertificateParams::new(vec![hostname.to_owned()]).unwrap();
    let leaf_cert = leaf_params.signed_by(&leaf_key, &ca_cert, &ca_key).unwrap();

    TestChain {
        leaf_pem: leaf_cert.pem(),
        root_pem: Some(ca_cert.pem()),
        leaf_key: leaf_private,
    }
}

/// An expired RSA leaf for `hostname`, signed by a throwaway root CA.
pub fn chained_expired(hostname: &str) -> TestChain {
    let (ca_cert, ca_key) = root_ca("skillgate test root");
    let (leaf_private, leaf_key) = rsa_leaf_keypair();
    let mut leaf_params = CertificateParams::new(vec![hostname.to_owned()]).unwrap();
    leaf_params.not_before = rcgen::date_time_ymd(2000, 1, 1);
    leaf_params.not_after = rcgen::date_time_ymd(2001, 1, 1);
    let leaf_cert = leaf_params.signed_by(&leaf_key, &ca_cert, &ca_key).unwrap();

    TestChain {
        leaf_pem: leaf_cert.pem(),
        root_pem: Some(ca_cert.pem()),
        leaf_key: leaf_private,
    }
}

/// A bare self-signed RSA leaf for `hostname`; nothing accompanies it.
pub fn self_signed(hostname: &str) -> TestChain {
    let (leaf_private, leaf_key) = rsa_leaf_keypair();
    let leaf_params = CertificateParams::new(vec![hostname.to_owned()]).unwrap();
    let leaf_cert = leaf_params.self_signed(&leaf_key).unwrap();

    TestChain {
        leaf_pem: leaf_cert.pem(),
        root_pem: None,
        leaf_key: leaf_private,
    }
}

/// An RSA leaf signed by one CA, bundled with a different, unrelated CA.
pub fn chained_to_wrong_root(hostname: &str) -> TestChain {
    let (ca_cert, ca_key) = root_ca("skillgate signing root");
    let (other_cert, _other_key) = root_ca("skillgate unrelated root");
    let (leaf_private, leaf_key) = rsa_leaf_keypair();
    let leaf_params = CertificateParams::new(vec![hostname.to_owned()]).unwrap();
    let leaf_cert = leaf_params.signed_by(&leaf_key, &ca_cert, &ca_key).unwrap();

    TestChain {
        leaf_pem: leaf_cert.pem(),
        root_pem: Some(other_cert.pem()),
        leaf_key: leaf_private,
    }
}

/// Sign `body` the way the platform does: SHA-1 + PKCS#1 v1.5, base64.
pub fn sign_body(key: &RsaPrivateKey, body: &[u8]) -> String {
    let signing = SigningKey::<Sha1>::new(key.clone());
    STANDARD.encode(signing.sign(body).to_bytes())
}

/// A request body whose declared timestamp is `age_secs` in the past.
pub fn body_aged(age_secs: i64) -> Vec<u8> {
    let stamp = (Utc::now() - Duration::seconds(age_secs))
        .format("%Y-%m-%dT%H:%M:%SZ")
        .to_string();
    format!(
        r#"{{"version":"1.0","request":{{"type":"IntentRequest","requestId":"r-1","timestamp":"{stamp}"}}}}"#
    )
    .into_bytes()
}

/// A fetcher that serves a canned payload and counts invocations.
pub struct StaticChainFetcher {
    payload: Vec<u8>,
    calls: AtomicUsize,
}

impl StaticChainFetcher {
    pub fn new(payload: Vec<u8>) -> Arc<Self> {
        Arc::new(Self {
            payload,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ChainFetcher for StaticChainFetcher {
    fn fetch<'a>(&'a self, _url: &'a str) -> BoxFuture<'a, Result<Vec<u8>, VerifyError>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move { Ok(self.payload.clone()) })
    }
}

/// A fetcher whose every call fails at the transport layer.
pub struct FailingFetcher;

impl ChainFetcher for FailingFetcher {
    fn fetch<'a>(&'a self, _url: &'a str) -> BoxFuture<'a, Result<Vec<u8>, VerifyError>> {
        Box::pin(async { Err(VerifyError::FetchFailed("connection refused".to_owned())) })
    }
}
