//! Events raised by a peer connection.
//!
//! Events are queued on an unbounded channel and read with
//! [`poll_event`](crate::peer_connection::RTCPeerConnection::poll_event) or
//! [`recv_event`](crate::peer_connection::RTCPeerConnection::recv_event).
//! State change events are only raised when the state actually changes.

use crate::peer_connection::state::ice_connection_state::RTCIceConnectionState;
use crate::peer_connection::state::ice_gathering_state::RTCIceGatheringState;
use crate::peer_connection::state::peer_connection_state::RTCPeerConnectionState;
use crate::peer_connection::state::signaling_state::RTCSignalingState;

mod track_event;

pub use track_event::RTCTrackEvent;

#[allow(clippy::enum_variant_names)]
#[derive(Debug)]
pub enum RTCPeerConnectionEvent {
    OnSignalingStateChangeEvent(RTCSignalingState),
    OnIceConnectionStateChangeEvent(RTCIceConnectionState),
    OnIceGatheringStateChangeEvent(RTCIceGatheringState),
    OnConnectionStateChangeEvent(RTCPeerConnectionState),

    // The RTP media API extends the RTCPeerConnection interface as described below.
    OnTrack(RTCTrackEvent),
}
