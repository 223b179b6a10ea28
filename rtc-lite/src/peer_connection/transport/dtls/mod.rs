//! Secure-transport collaborators.
//!
//! The handshake itself happens inside each transport endpoint. The peer
//! connection only needs a [`Credential`] whose fingerprint is advertised in
//! the session description and handed to every endpoint it binds.

use std::fmt;
use std::sync::Arc;

use rcgen::KeyPair;
use serde::{Deserialize, Serialize};

use crate::peer_connection::certificate::RTCCertificate;
use shared::error::Result;

/// DTLS certificate fingerprint as written in `a=fingerprint`.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RTCDtlsFingerprint {
    /// Hash function name, for example `sha-256`.
    pub algorithm: String,

    /// Colon separated lower case hex bytes.
    pub value: String,
}

impl fmt::Display for RTCDtlsFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.algorithm, self.value)
    }
}

/// Key material of the secure transport, reduced to what negotiation needs.
pub trait Credential: fmt::Debug + Send + Sync {
    fn fingerprint(&self) -> String;

    fn algorithm(&self) -> &str {
        "sha-256"
    }
}

/// Produces the credential of a new peer connection.
pub trait SecureTransportProvider: Send + Sync {
    fn new_credential(&self) -> Result<Arc<dyn Credential>>;
}

/// Generates a fresh ECDSA P-256 certificate per peer connection.
#[derive(Default, Debug, Copy, Clone)]
pub struct CertificateProvider;

impl SecureTransportProvider for CertificateProvider {
    fn new_credential(&self) -> Result<Arc<dyn Credential>> {
        let kp = KeyPair::generate_for(&rcgen::PKCS_ECDSA_P256_SHA256)?;
        Ok(Arc::new(RTCCertificate::from_key_pair(kp)?))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_certificate_provider() -> Result<()> {
        let provider = CertificateProvider;
        let a = provider.new_credential()?;
        let b = provider.new_credential()?;

        assert_eq!(a.algorithm(), "sha-256");
        assert_ne!(a.fingerprint(), b.fingerprint());

        Ok(())
    }

    #[test]
    fn test_fingerprint_display() {
        let fingerprint = RTCDtlsFingerprint {
            algorithm: "sha-256".to_owned(),
            value: "ab:cd".to_owned(),
        };
        assert_eq!(fingerprint.to_string(), "sha-256 ab:cd");
    }
}
