use std::fmt;

use crate::peer_connection::configuration::UNSPECIFIED_STR;
use crate::peer_connection::sdp::RTCSdpType;
use shared::error::{Error, Result};

/// Which side of the exchange a description is applied to.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum StateChangeOp {
    #[default]
    SetLocal,
    SetRemote,
}

impl fmt::Display for StateChangeOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            StateChangeOp::SetLocal => write!(f, "SetLocal"),
            StateChangeOp::SetRemote => write!(f, "SetRemote"),
        }
    }
}

/// Indicates the state of the offer/answer negotiation.
///
/// Legal transitions:
///
/// | current              | action                 | next                 |
/// |----------------------|------------------------|----------------------|
/// | stable               | local sets offer       | have-local-offer     |
/// | stable               | remote sets offer      | have-remote-offer    |
/// | have-local-offer     | remote sets pranswer   | have-remote-pranswer |
/// | have-local-offer     | remote sets answer     | stable               |
/// | have-remote-offer    | local sets pranswer    | have-local-pranswer  |
/// | have-remote-offer    | local sets answer      | stable               |
/// | have-remote-pranswer | local sets answer      | stable               |
/// | have-local-pranswer  | remote sets answer     | stable               |
///
/// Re-applying a description of the kind that produced the current state is a
/// self loop: local offer in have-local-offer, local pranswer in
/// have-local-pranswer and remote pranswer in have-remote-pranswer.
///
/// `Closed` is terminal. Rollback is not supported.
///
/// # Specifications
///
/// - [W3C RTCPeerConnection.signalingState]
/// - [RFC 8829 Section 3.2] - JSEP state machine
///
/// [W3C RTCPeerConnection.signalingState]: https://w3c.github.io/webrtc-pc/#dom-peerconnection-signaling-state
/// [RFC 8829 Section 3.2]: https://datatracker.ietf.org/doc/html/rfc8829#section-3.2
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
pub enum RTCSignalingState {
    Unspecified = 0,

    /// No offer/answer exchange is in progress.
    #[default]
    Stable,

    /// A local offer has been applied, waiting for the remote answer.
    HaveLocalOffer,

    /// A remote offer has been applied, waiting for the local answer.
    HaveRemoteOffer,

    /// A remote offer and a local provisional answer have been applied.
    HaveLocalPranswer,

    /// A local offer and a remote provisional answer have been applied.
    HaveRemotePranswer,

    /// The peer connection has been closed.
    Closed,
}

const SIGNALING_STATE_STABLE_STR: &str = "stable";
const SIGNALING_STATE_HAVE_LOCAL_OFFER_STR: &str = "have-local-offer";
const SIGNALING_STATE_HAVE_REMOTE_OFFER_STR: &str = "have-remote-offer";
const SIGNALING_STATE_HAVE_LOCAL_PRANSWER_STR: &str = "have-local-pranswer";
const SIGNALING_STATE_HAVE_REMOTE_PRANSWER_STR: &str = "have-remote-pranswer";
const SIGNALING_STATE_CLOSED_STR: &str = "closed";

impl From<&str> for RTCSignalingState {
    fn from(raw: &str) -> Self {
        match raw {
            SIGNALING_STATE_STABLE_STR => RTCSignalingState::Stable,
            SIGNALING_STATE_HAVE_LOCAL_OFFER_STR => RTCSignalingState::HaveLocalOffer,
            SIGNALING_STATE_HAVE_REMOTE_OFFER_STR => RTCSignalingState::HaveRemoteOffer,
            SIGNALING_STATE_HAVE_LOCAL_PRANSWER_STR => RTCSignalingState::HaveLocalPranswer,
            SIGNALING_STATE_HAVE_REMOTE_PRANSWER_STR => RTCSignalingState::HaveRemotePranswer,
            SIGNALING_STATE_CLOSED_STR => RTCSignalingState::Closed,
            _ => RTCSignalingState::Unspecified,
        }
    }
}

impl fmt::Display for RTCSignalingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            RTCSignalingState::Stable => SIGNALING_STATE_STABLE_STR,
            RTCSignalingState::HaveLocalOffer => SIGNALING_STATE_HAVE_LOCAL_OFFER_STR,
            RTCSignalingState::HaveRemoteOffer => SIGNALING_STATE_HAVE_REMOTE_OFFER_STR,
            RTCSignalingState::HaveLocalPranswer => SIGNALING_STATE_HAVE_LOCAL_PRANSWER_STR,
            RTCSignalingState::HaveRemotePranswer => SIGNALING_STATE_HAVE_REMOTE_PRANSWER_STR,
            RTCSignalingState::Closed => SIGNALING_STATE_CLOSED_STR,
            RTCSignalingState::Unspecified => UNSPECIFIED_STR,
        };
        write!(f, "{s}")
    }
}

impl From<u8> for RTCSignalingState {
    fn from(v: u8) -> Self {
        match v {
            1 => RTCSignalingState::Stable,
            2 => RTCSignalingState::HaveLocalOffer,
            3 => RTCSignalingState::HaveRemoteOffer,
            4 => RTCSignalingState::HaveLocalPranswer,
            5 => RTCSignalingState::HaveRemotePranswer,
            6 => RTCSignalingState::Closed,
            _ => RTCSignalingState::Unspecified,
        }
    }
}

/// next_signaling_state returns the state reached by applying a description of
/// `sdp_type` on the `op` side while in `cur`, or an error leaving `cur` untouched.
pub(crate) fn next_signaling_state(
    cur: RTCSignalingState,
    op: StateChangeOp,
    sdp_type: RTCSdpType,
) -> Result<RTCSignalingState> {
    use RTCSdpType::*;
    use RTCSignalingState::*;
    use StateChangeOp::*;

    if sdp_type == Rollback {
        return Err(Error::ErrSignalingStateRollbackNotSupported);
    }

    let next = match (cur, op, sdp_type) {
        (Stable, SetLocal, Offer) => Some(HaveLocalOffer),
        (Stable, SetRemote, Offer) => Some(HaveRemoteOffer),

        (HaveLocalOffer, SetLocal, Offer) => Some(HaveLocalOffer),
        (HaveLocalOffer, SetRemote, Pranswer) => Some(HaveRemotePranswer),
        (HaveLocalOffer, SetRemote, Answer) => Some(Stable),

        (HaveRemoteOffer, SetLocal, Pranswer) => Some(HaveLocalPranswer),
        (HaveRemoteOffer, SetLocal, Answer) => Some(Stable),

        (HaveRemotePranswer, SetRemote, Pranswer) => Some(HaveRemotePranswer),
        (HaveRemotePranswer, SetLocal, Answer) => Some(Stable),

        (HaveLocalPranswer, SetLocal, Pranswer) => Some(HaveLocalPranswer),
        (HaveLocalPranswer, SetRemote, Answer) => Some(Stable),

        _ => None,
    };

    next.ok_or_else(|| {
        Error::ErrSignalingStateProposedTransitionInvalid(format!(
            "from {cur} applying {op} {sdp_type}"
        ))
    })
}
