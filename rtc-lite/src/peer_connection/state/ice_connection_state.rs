use crate::peer_connection::configuration::UNSPECIFIED_STR;
use std::fmt;

/// Indicates the state of the ICE connection.
///
/// With ICE-lite endpoints the state is an aggregate over the live endpoint set:
///
/// - **New** - no endpoint has reported liveness yet
/// - **Connected** - at least one endpoint reported a liveness change other than failure
/// - **Disconnected** - the last live endpoint failed and was removed
/// - **Closed** - the peer connection has been closed
///
/// `Checking`, `Completed` and `Failed` are part of the W3C enumeration and are
/// accepted when parsing, but the aggregation never produces them.
///
/// See the [W3C iceConnectionState](https://w3c.github.io/webrtc-pc/#dom-peerconnection-ice-connection-state).
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
pub enum RTCIceConnectionState {
    #[default]
    Unspecified,
    New,
    Checking,
    /// At least one local endpoint is alive.
    Connected,
    Completed,
    /// Every local endpoint failed and has been removed.
    Disconnected,
    Failed,
    Closed,
}

impl RTCIceConnectionState {
    /// Every specified state, in discriminant order.
    const ALL: [RTCIceConnectionState; 7] = [
        Self::New,
        Self::Checking,
        Self::Connected,
        Self::Completed,
        Self::Disconnected,
        Self::Failed,
        Self::Closed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RTCIceConnectionState::New => "new",
            RTCIceConnectionState::Checking => "checking",
            RTCIceConnectionState::Connected => "connected",
            RTCIceConnectionState::Completed => "completed",
            RTCIceConnectionState::Disconnected => "disconnected",
            RTCIceConnectionState::Failed => "failed",
            RTCIceConnectionState::Closed => "closed",
            RTCIceConnectionState::Unspecified => UNSPECIFIED_STR,
        }
    }
}

impl From<&str> for RTCIceConnectionState {
    fn from(raw: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|state| state.as_str() == raw)
            .unwrap_or_default()
    }
}

impl From<u8> for RTCIceConnectionState {
    fn from(v: u8) -> Self {
        v.checked_sub(1)
            .and_then(|i| Self::ALL.get(i as usize))
            .copied()
            .unwrap_or_default()
    }
}

impl fmt::Display for RTCIceConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_ice_connection_state_conversions() {
        for state in RTCIceConnectionState::ALL {
            assert_eq!(RTCIceConnectionState::from(state as u8), state);
            assert_eq!(RTCIceConnectionState::from(state.as_str()), state);
        }

        assert_eq!(RTCIceConnectionState::from(0u8), RTCIceConnectionState::Unspecified);
        assert_eq!(RTCIceConnectionState::from(8u8), RTCIceConnectionState::Unspecified);
        assert_eq!(RTCIceConnectionState::Disconnected.to_string(), "disconnected");
    }
}
