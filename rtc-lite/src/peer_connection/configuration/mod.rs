pub mod media_engine;
pub mod offer_answer_options;
pub mod policy;

use std::time::SystemTime;

use crate::peer_connection::certificate::RTCCertificate;
use crate::peer_connection::transport::ice::server::RTCIceServer;
pub use offer_answer_options::{RTCAnswerOptions, RTCOfferOptions};
pub use policy::{RTCBundlePolicy, RTCIceTransportPolicy, RTCRtcpMuxPolicy};
use shared::error::{Error, Result};

/// Display form of every `Unspecified` enum value in this crate.
pub const UNSPECIFIED_STR: &str = "Unspecified";

/// A Configuration defines how peer-to-peer communication via PeerConnection
/// is established or re-established.
///
/// Configurations are plain values. A peer connection keeps its own copy and
/// replaces it atomically through
/// [`set_configuration`](crate::peer_connection::RTCPeerConnection::set_configuration).
///
/// ## Specifications
///
/// * [W3C]
///
/// [W3C]: https://w3c.github.io/webrtc-pc/#rtcconfiguration-dictionary
#[derive(Default, Debug, Clone)]
pub struct RTCConfiguration {
    /// ice_servers defines a slice describing servers available to be used by
    /// ICE, such as STUN and TURN servers.
    pub(crate) ice_servers: Vec<RTCIceServer>,

    /// ice_transport_policy indicates which candidates the ICEAgent is allowed
    /// to use.
    pub(crate) ice_transport_policy: RTCIceTransportPolicy,

    /// bundle_policy indicates which media-bundling policy to use when gathering
    /// ICE candidates.
    pub(crate) bundle_policy: RTCBundlePolicy,

    /// rtcp_mux_policy indicates which rtcp-mux policy to use when gathering ICE
    /// candidates.
    pub(crate) rtcp_mux_policy: RTCRtcpMuxPolicy,

    /// peer_identity sets the target peer identity for the PeerConnection.
    pub(crate) peer_identity: String,

    /// certificates describes a set of certificates that the PeerConnection
    /// uses to authenticate. The first one backs the local fingerprint. If
    /// this value is empty, a certificate is generated for each
    /// PeerConnection instance.
    pub(crate) certificates: Vec<RTCCertificate>,

    /// ice_candidate_pool_size describes the size of the prefetched ICE pool.
    pub(crate) ice_candidate_pool_size: u8,
}

impl RTCConfiguration {
    pub fn ice_servers(&self) -> &[RTCIceServer] {
        &self.ice_servers
    }

    pub fn ice_transport_policy(&self) -> RTCIceTransportPolicy {
        self.ice_transport_policy
    }

    pub fn bundle_policy(&self) -> RTCBundlePolicy {
        self.bundle_policy
    }

    pub fn rtcp_mux_policy(&self) -> RTCRtcpMuxPolicy {
        self.rtcp_mux_policy
    }

    pub fn peer_identity(&self) -> &str {
        &self.peer_identity
    }

    pub fn certificates(&self) -> &[RTCCertificate] {
        &self.certificates
    }

    pub fn ice_candidate_pool_size(&self) -> u8 {
        self.ice_candidate_pool_size
    }
}

#[derive(Default)]
pub struct RTCConfigurationBuilder {
    ice_servers: Vec<RTCIceServer>,
    ice_transport_policy: RTCIceTransportPolicy,
    bundle_policy: RTCBundlePolicy,
    rtcp_mux_policy: RTCRtcpMuxPolicy,
    peer_identity: String,
    certificates: Vec<RTCCertificate>,
    ice_candidate_pool_size: u8,
}

impl RTCConfigurationBuilder {
    pub fn new() -> Self {
        RTCConfigurationBuilder::default()
    }

    pub fn with_ice_servers(mut self, ice_servers: Vec<RTCIceServer>) -> Self {
        self.ice_servers = ice_servers;
        self
    }

    pub fn with_ice_transport_policy(
        mut self,
        ice_transport_policy: RTCIceTransportPolicy,
    ) -> Self {
        self.ice_transport_policy = ice_transport_policy;
        self
    }

    pub fn with_bundle_policy(mut self, bundle_policy: RTCBundlePolicy) -> Self {
        self.bundle_policy = bundle_policy;
        self
    }

    pub fn with_rtcp_mux_policy(mut self, rtcp_mux_policy: RTCRtcpMuxPolicy) -> Self {
        self.rtcp_mux_policy = rtcp_mux_policy;
        self
    }

    pub fn with_peer_identity(mut self, peer_identity: String) -> Self {
        self.peer_identity = peer_identity;
        self
    }

    pub fn with_certificates(mut self, certificates: Vec<RTCCertificate>) -> Self {
        self.certificates = certificates;
        self
    }

    pub fn with_ice_candidate_pool_size(mut self, ice_candidate_pool_size: u8) -> Self {
        self.ice_candidate_pool_size = ice_candidate_pool_size;
        self
    }

    pub fn build(self) -> RTCConfiguration {
        RTCConfiguration {
            ice_servers: self.ice_servers,
            ice_transport_policy: self.ice_transport_policy,
            bundle_policy: self.bundle_policy,
            rtcp_mux_policy: self.rtcp_mux_policy,
            peer_identity: self.peer_identity,
            certificates: self.certificates,
            ice_candidate_pool_size: self.ice_candidate_pool_size,
        }
    }
}

/// validate_configuration checks whether `proposed` may replace `current`.
///
/// Rules are checked in order and the first violation is returned. Nothing is
/// mutated, the caller swaps the configuration only on `Ok`.
pub fn validate_configuration(
    current: &RTCConfiguration,
    proposed: &RTCConfiguration,
    has_local_description: bool,
) -> Result<()> {
    // https://www.w3.org/TR/webrtc/#set-the-configuration (step #3)
    if !current.peer_identity.is_empty()
        && !proposed.peer_identity.is_empty()
        && current.peer_identity != proposed.peer_identity
    {
        return Err(Error::ErrModifyingPeerIdentity);
    }

    // https://www.w3.org/TR/webrtc/#set-the-configuration (step #4)
    if !current.certificates.is_empty() && !proposed.certificates.is_empty() {
        if current.certificates.len() != proposed.certificates.len() {
            return Err(Error::ErrModifyingCertificates);
        }
        for (cur, new) in current.certificates.iter().zip(&proposed.certificates) {
            if cur != new {
                return Err(Error::ErrModifyingCertificates);
            }
        }
    }

    let now = SystemTime::now();
    for certificate in &proposed.certificates {
        if certificate.expires() < now {
            return Err(Error::ErrCertificateExpired);
        }
    }

    if has_local_description {
        // https://www.w3.org/TR/webrtc/#set-the-configuration (step #5)
        if current.bundle_policy != proposed.bundle_policy {
            return Err(Error::ErrModifyingBundlePolicy);
        }

        // https://www.w3.org/TR/webrtc/#set-the-configuration (step #6)
        if current.rtcp_mux_policy != proposed.rtcp_mux_policy {
            return Err(Error::ErrModifyingRTCPMuxPolicy);
        }

        // https://www.w3.org/TR/webrtc/#set-the-configuration (step #7)
        if current.ice_candidate_pool_size != proposed.ice_candidate_pool_size {
            return Err(Error::ErrModifyingICECandidatePoolSize);
        }
    }

    // https://www.w3.org/TR/webrtc/#set-the-configuration (step #11)
    for server in &proposed.ice_servers {
        server.validate()?;
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use super::*;
    use crate::peer_connection::transport::ice::server::RTCIceCredential;
    use shared::error::ErrorKind;

    fn certificate_expiring_in(secs: u64) -> RTCCertificate {
        RTCCertificate::from_existing(vec![], SystemTime::now() + Duration::from_secs(secs))
    }

    #[test]
    fn test_validate_peer_identity() {
        let current = RTCConfigurationBuilder::new()
            .with_peer_identity("unittest".to_owned())
            .build();

        let same = RTCConfigurationBuilder::new()
            .with_peer_identity("unittest".to_owned())
            .build();
        assert_eq!(validate_configuration(&current, &same, false), Ok(()));

        let cleared = RTCConfiguration::default();
        assert_eq!(validate_configuration(&current, &cleared, false), Ok(()));

        let changed = RTCConfigurationBuilder::new()
            .with_peer_identity("otherident".to_owned())
            .build();
        let err = validate_configuration(&current, &changed, false);
        assert_eq!(err, Err(Error::ErrModifyingPeerIdentity));
        assert_eq!(
            err.err().map(|e| e.kind()),
            Some(ErrorKind::InvalidModification)
        );
    }

    #[test]
    fn test_validate_certificates() {
        let a = certificate_expiring_in(3600);
        let b = certificate_expiring_in(7200);

        let current = RTCConfigurationBuilder::new()
            .with_certificates(vec![a.clone()])
            .build();

        let tests = vec![
            ("same certificate", vec![a.clone()], Ok(())),
            ("empty list", vec![], Ok(())),
            (
                "different certificate",
                vec![b.clone()],
                Err(Error::ErrModifyingCertificates),
            ),
            (
                "more certificates",
                vec![a.clone(), b.clone()],
                Err(Error::ErrModifyingCertificates),
            ),
        ];

        for (name, certificates, expected) in tests {
            let proposed = RTCConfigurationBuilder::new()
                .with_certificates(certificates)
                .build();
            assert_eq!(
                validate_configuration(&current, &proposed, false),
                expected,
                "{name}"
            );
        }
    }

    #[test]
    fn test_validate_expired_certificate() {
        let expired =
            RTCCertificate::from_existing(vec![], SystemTime::now() - Duration::from_secs(60));

        let proposed = RTCConfigurationBuilder::new()
            .with_certificates(vec![expired])
            .build();

        let err = validate_configuration(&RTCConfiguration::default(), &proposed, false);
        assert_eq!(err, Err(Error::ErrCertificateExpired));
        assert_eq!(Error::ErrCertificateExpired.kind(), ErrorKind::InvalidAccess);
    }

    #[test]
    fn test_validate_frozen_after_local_description() {
        let current = RTCConfigurationBuilder::new()
            .with_bundle_policy(RTCBundlePolicy::Balanced)
            .with_rtcp_mux_policy(RTCRtcpMuxPolicy::Require)
            .with_ice_candidate_pool_size(2)
            .build();

        let tests = vec![
            (
                "bundle policy",
                RTCConfigurationBuilder::new()
                    .with_bundle_policy(RTCBundlePolicy::MaxBundle)
                    .with_rtcp_mux_policy(RTCRtcpMuxPolicy::Require)
                    .with_ice_candidate_pool_size(2)
                    .build(),
                Error::ErrModifyingBundlePolicy,
            ),
            (
                "rtcp mux policy",
                RTCConfigurationBuilder::new()
                    .with_bundle_policy(RTCBundlePolicy::Balanced)
                    .with_rtcp_mux_policy(RTCRtcpMuxPolicy::Negotiate)
                    .with_ice_candidate_pool_size(2)
                    .build(),
                Error::ErrModifyingRTCPMuxPolicy,
            ),
            (
                "candidate pool size",
                RTCConfigurationBuilder::new()
                    .with_bundle_policy(RTCBundlePolicy::Balanced)
                    .with_rtcp_mux_policy(RTCRtcpMuxPolicy::Require)
                    .with_ice_candidate_pool_size(5)
                    .build(),
                Error::ErrModifyingICECandidatePoolSize,
            ),
        ];

        for (name, proposed, expected) in tests {
            assert_eq!(
                validate_configuration(&current, &proposed, false),
                Ok(()),
                "{name} before local description"
            );
            assert_eq!(
                validate_configuration(&current, &proposed, true),
                Err(expected),
                "{name} after local description"
            );
        }
    }

    #[test]
    fn test_validate_ice_servers() {
        let tests = vec![
            (
                "stun without credentials",
                RTCIceServer {
                    urls: vec!["stun:stun.l.google.com:19302".to_owned()],
                    ..Default::default()
                },
                Ok(()),
            ),
            (
                "turn with password",
                RTCIceServer {
                    urls: vec!["turn:turn.example.org:3478?transport=udp".to_owned()],
                    username: "unittest".to_owned(),
                    credential: Some(RTCIceCredential::Password("placeholder".to_owned())),
                    ..Default::default()
                },
                Ok(()),
            ),
            (
                "turn without credentials",
                RTCIceServer {
                    urls: vec!["turn:turn.example.org:3478".to_owned()],
                    ..Default::default()
                },
                Err(Error::ErrNoTurnCredentials),
            ),
            (
                "malformed url",
                RTCIceServer {
                    urls: vec!["stun:".to_owned()],
                    ..Default::default()
                },
                Err(Error::ErrServerAddr),
            ),
        ];

        for (name, server, expected) in tests {
            let proposed = RTCConfigurationBuilder::new()
                .with_ice_servers(vec![server])
                .build();
            assert_eq!(
                validate_configuration(&RTCConfiguration::default(), &proposed, false),
                expected,
                "{name}"
            );
        }
    }
}
