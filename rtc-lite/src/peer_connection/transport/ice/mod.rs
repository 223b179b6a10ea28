//! ICE-lite pieces: server URLs and credentials, host candidates and the
//! liveness reported by each transport endpoint.

pub mod candidate;
pub mod server;
pub mod state;
pub mod url;

pub use candidate::RTCIceCandidate;
pub use server::{RTCIceCredential, RTCIceCredentialType, RTCIceServer, RTCOAuthCredential};
pub use state::RTCIceTransportState;
pub use url::{RTCIceProtoType, RTCIceServerType, RTCIceServerUrl};

/// Length of the `a=ice-ufrag` value of each media description.
pub(crate) const ICE_UFRAG_LEN: usize = 16;

/// Length of the `a=ice-pwd` value of each media description.
pub(crate) const ICE_PWD_LEN: usize = 32;
