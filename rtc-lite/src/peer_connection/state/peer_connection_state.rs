use crate::peer_connection::configuration::UNSPECIFIED_STR;
use crate::peer_connection::state::RTCIceConnectionState;
use std::fmt;

/// Indicates the overall state of the peer connection.
///
/// The secure-transport handshake is owned by the endpoints, so the aggregate
/// state follows the ICE connection state:
///
/// ```text
/// New → Connected ⇄ Disconnected
/// Any state → Closed
/// ```
///
/// `Connecting` and `Failed` are kept for parity with the W3C enumeration.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
pub enum RTCPeerConnectionState {
    #[default]
    Unspecified,
    /// No endpoint has reported liveness yet.
    New,
    Connecting,
    /// At least one endpoint is live.
    Connected,
    /// The live endpoint set became empty.
    Disconnected,
    Failed,
    /// [`RTCPeerConnection::close`](crate::peer_connection::RTCPeerConnection::close) was called.
    Closed,
}

impl RTCPeerConnectionState {
    /// Every specified state, in discriminant order.
    const ALL: [RTCPeerConnectionState; 6] = [
        Self::New,
        Self::Connecting,
        Self::Connected,
        Self::Disconnected,
        Self::Failed,
        Self::Closed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RTCPeerConnectionState::New => "new",
            RTCPeerConnectionState::Connecting => "connecting",
            RTCPeerConnectionState::Connected => "connected",
            RTCPeerConnectionState::Disconnected => "disconnected",
            RTCPeerConnectionState::Failed => "failed",
            RTCPeerConnectionState::Closed => "closed",
            RTCPeerConnectionState::Unspecified => UNSPECIFIED_STR,
        }
    }
}

impl From<&str> for RTCPeerConnectionState {
    fn from(raw: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|state| state.as_str() == raw)
            .unwrap_or_default()
    }
}

impl From<u8> for RTCPeerConnectionState {
    fn from(v: u8) -> Self {
        v.checked_sub(1)
            .and_then(|i| Self::ALL.get(i as usize))
            .copied()
            .unwrap_or_default()
    }
}

impl From<RTCIceConnectionState> for RTCPeerConnectionState {
    fn from(state: RTCIceConnectionState) -> Self {
        match state {
            RTCIceConnectionState::New => RTCPeerConnectionState::New,
            RTCIceConnectionState::Checking => RTCPeerConnectionState::Connecting,
            RTCIceConnectionState::Connected | RTCIceConnectionState::Completed => {
                RTCPeerConnectionState::Connected
            }
            RTCIceConnectionState::Disconnected => RTCPeerConnectionState::Disconnected,
            RTCIceConnectionState::Failed => RTCPeerConnectionState::Failed,
            RTCIceConnectionState::Closed => RTCPeerConnectionState::Closed,
            RTCIceConnectionState::Unspecified => RTCPeerConnectionState::Unspecified,
        }
    }
}

impl fmt::Display for RTCPeerConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
