use std::fmt;

use crate::peer_connection::configuration::UNSPECIFIED_STR;

/// Liveness of a single transport endpoint, as reported by the endpoint.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
pub enum RTCIceTransportState {
    #[default]
    Unspecified,

    /// Bound, no connectivity check answered yet.
    New,

    /// The remote peer is reachable through this endpoint.
    Connected,

    /// Connectivity was lost and may come back.
    Disconnected,

    /// Connectivity is lost for good; the endpoint is closed and dropped.
    Failed,

    /// The endpoint was shut down.
    Closed,
}

const ICE_TRANSPORT_STATE_NEW_STR: &str = "new";
const ICE_TRANSPORT_STATE_CONNECTED_STR: &str = "connected";
const ICE_TRANSPORT_STATE_DISCONNECTED_STR: &str = "disconnected";
const ICE_TRANSPORT_STATE_FAILED_STR: &str = "failed";
const ICE_TRANSPORT_STATE_CLOSED_STR: &str = "closed";

impl From<&str> for RTCIceTransportState {
    fn from(raw: &str) -> Self {
        match raw {
            ICE_TRANSPORT_STATE_NEW_STR => RTCIceTransportState::New,
            ICE_TRANSPORT_STATE_CONNECTED_STR => RTCIceTransportState::Connected,
            ICE_TRANSPORT_STATE_DISCONNECTED_STR => RTCIceTransportState::Disconnected,
            ICE_TRANSPORT_STATE_FAILED_STR => RTCIceTransportState::Failed,
            ICE_TRANSPORT_STATE_CLOSED_STR => RTCIceTransportState::Closed,
            _ => RTCIceTransportState::Unspecified,
        }
    }
}

impl fmt::Display for RTCIceTransportState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            RTCIceTransportState::New => ICE_TRANSPORT_STATE_NEW_STR,
            RTCIceTransportState::Connected => ICE_TRANSPORT_STATE_CONNECTED_STR,
            RTCIceTransportState::Disconnected => ICE_TRANSPORT_STATE_DISCONNECTED_STR,
            RTCIceTransportState::Failed => ICE_TRANSPORT_STATE_FAILED_STR,
            RTCIceTransportState::Closed => ICE_TRANSPORT_STATE_CLOSED_STR,
            RTCIceTransportState::Unspecified => UNSPECIFIED_STR,
        };
        write!(f, "{s}")
    }
}
