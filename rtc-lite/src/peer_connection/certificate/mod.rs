//! Certificates backing the local fingerprint.
//!
//! A peer connection advertises the SHA-256 fingerprint of its certificate in
//! every media description (`a=fingerprint:sha-256 ...`). Certificates can be
//! generated from an `rcgen` key pair or wrap DER bytes obtained elsewhere.
//!
//! # Examples
//!
//! ```
//! use rtc_lite::peer_connection::certificate::RTCCertificate;
//! use rcgen::KeyPair;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let key_pair = KeyPair::generate_for(&rcgen::PKCS_ECDSA_P256_SHA256)?;
//! let certificate = RTCCertificate::from_key_pair(key_pair)?;
//!
//! let fingerprint = certificate.get_fingerprint();
//! assert_eq!(fingerprint.algorithm, "sha-256");
//! # Ok(())
//! # }
//! ```

use std::time::SystemTime;

use rcgen::{CertificateParams, KeyPair};
use sha2::{Digest, Sha256};

use crate::peer_connection::transport::dtls::{Credential, RTCDtlsFingerprint};
use shared::error::{Error, Result};
use shared::util::math_rand_alpha;

/// Certificate represents a X.509 certificate used to authenticate WebRTC communications.
///
/// Two certificates compare equal when they expire at the same instant.
///
/// ## Specifications
///
/// * [MDN RTCCertificate](https://developer.mozilla.org/en-US/docs/Web/API/RTCCertificate)
/// * [W3C RTCCertificate](https://w3c.github.io/webrtc-pc/#dom-rtccertificate)
#[derive(Clone, Debug)]
pub struct RTCCertificate {
    /// DER encoded X.509 certificate
    pub(crate) certificate: Vec<u8>,

    /// DER encoded private key, empty when the certificate was imported
    pub(crate) private_key: Vec<u8>,

    /// Timestamp after which this certificate is no longer valid
    pub(crate) expires: SystemTime,
}

impl PartialEq for RTCCertificate {
    fn eq(&self, other: &Self) -> bool {
        self.expires == other.expires
    }
}

impl RTCCertificate {
    /// Generates a self-signed certificate with a random common name.
    ///
    /// The key pair must be ECDSA P-256 or Ed25519.
    pub fn from_key_pair(key_pair: KeyPair) -> Result<Self> {
        if !(key_pair.is_compatible(&rcgen::PKCS_ED25519)
            || key_pair.is_compatible(&rcgen::PKCS_ECDSA_P256_SHA256))
        {
            return Err(Error::Other("Unsupported key_pair".to_owned()));
        }

        let params = CertificateParams::new(vec![math_rand_alpha(16)])?;
        let expires = params.not_after.into();
        let x509_cert = params.self_signed(&key_pair)?;

        Ok(Self {
            certificate: x509_cert.der().to_vec(),
            private_key: key_pair.serialize_der(),
            expires,
        })
    }

    /// Wraps an existing DER certificate whose validity ends at `expires`.
    pub fn from_existing(certificate: Vec<u8>, expires: SystemTime) -> Self {
        Self {
            certificate,
            private_key: vec![],
            expires,
        }
    }

    pub fn expires(&self) -> SystemTime {
        self.expires
    }

    pub fn der(&self) -> &[u8] {
        &self.certificate
    }

    /// get_fingerprint hashes the DER certificate with SHA-256.
    pub fn get_fingerprint(&self) -> RTCDtlsFingerprint {
        let mut h = Sha256::new();
        h.update(&self.certificate);
        let hashed = h.finalize();
        let values: Vec<String> = hashed.iter().map(|x| format!("{x:02x}")).collect();

        RTCDtlsFingerprint {
            algorithm: "sha-256".to_owned(),
            value: values.join(":"),
        }
    }
}

impl Credential for RTCCertificate {
    fn fingerprint(&self) -> String {
        self.get_fingerprint().value
    }
}
