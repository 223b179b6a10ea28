//! Connection state types.
//!
//! A peer connection tracks four independent state machines:
//!
//! - **[`RTCSignalingState`]** - offer/answer negotiation progress (stable, have-local-offer, ...)
//! - **[`RTCIceGatheringState`]** - host candidate gathering (new, gathering, complete)
//! - **[`RTCIceConnectionState`]** - liveness aggregated over every local transport endpoint
//! - **[`RTCPeerConnectionState`]** - overall connection state derived from the ICE state
//!
//! Changes of the last three are reported through
//! [`RTCPeerConnectionEvent`](crate::peer_connection::event::RTCPeerConnectionEvent)s
//! instead of callbacks, so handlers never re-enter the connection.
//!
//! # String Conversion
//!
//! ```
//! use rtc_lite::peer_connection::state::{
//!     RTCIceConnectionState, RTCPeerConnectionState, RTCSignalingState
//! };
//!
//! let state = RTCIceConnectionState::Connected;
//! assert_eq!(state.to_string(), "connected");
//!
//! let state: RTCPeerConnectionState = "disconnected".into();
//! assert_eq!(state, RTCPeerConnectionState::Disconnected);
//!
//! let state: RTCSignalingState = "have-local-offer".into();
//! assert_eq!(state, RTCSignalingState::HaveLocalOffer);
//! ```
//!
//! # Signaling States (Offer/Answer)
//!
//! ```text
//! Stable → HaveLocalOffer → Stable
//! Stable → HaveRemoteOffer → Stable
//! Stable → HaveLocalOffer → HaveRemotePranswer → Stable
//! Stable → HaveRemoteOffer → HaveLocalPranswer → Stable
//! ```
//!
//! `Closed` is terminal and only reached through
//! [`RTCPeerConnection::close`](crate::peer_connection::RTCPeerConnection::close).
//!
//! # ICE Connection States
//!
//! Every local interface is a separate ICE-lite endpoint. The aggregate state is
//! `Connected` while any endpoint reports liveness and becomes `Disconnected` once
//! the last endpoint failed and was removed:
//!
//! ```text
//! New → Connected ⇄ Disconnected
//!   └───────┴───────────┴→ Closed
//! ```

pub(crate) mod ice_connection_state;
pub(crate) mod ice_gathering_state;
pub(crate) mod peer_connection_state;
pub(crate) mod signaling_state;

pub use ice_connection_state::RTCIceConnectionState;
pub use ice_gathering_state::RTCIceGatheringState;
pub use peer_connection_state::RTCPeerConnectionState;
pub use signaling_state::RTCSignalingState;
