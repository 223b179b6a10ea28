//! Transport collaborators of a peer connection.
//!
//! Every host interface gets its own ICE-lite [`Endpoint`](endpoint::Endpoint),
//! bound by an [`EndpointFactory`](endpoint::EndpointFactory) while the first
//! offer or answer is created:
//!
//! ```text
//! HostInterfaces ──▶ EndpointFactory::bind ──▶ Endpoint (one per address)
//!                          │                        │
//!              Credential ─┘        EndpointEvent ◀─┘ packets, liveness
//! ```
//!
//! - [`ice`] - server URLs and credentials, host candidates, endpoint liveness
//! - [`dtls`] - the credential whose fingerprint is advertised in descriptions
//! - [`endpoint`] - endpoint traits and the events endpoints report
//! - [`ifaces`] - enumeration of local addresses

pub mod dtls;
pub mod endpoint;
pub mod ice;
pub mod ifaces;

pub use dtls::{CertificateProvider, Credential, RTCDtlsFingerprint, SecureTransportProvider};
pub use endpoint::{Endpoint, EndpointEvent, EndpointEventSender, EndpointFactory, EndpointId};
pub use ice::{
    RTCIceCandidate, RTCIceCredential, RTCIceCredentialType, RTCIceProtoType, RTCIceServer,
    RTCIceServerType, RTCIceServerUrl, RTCIceTransportState, RTCOAuthCredential,
};
pub use ifaces::{HostInterfaces, StaticInterfaces, SystemInterfaces};
