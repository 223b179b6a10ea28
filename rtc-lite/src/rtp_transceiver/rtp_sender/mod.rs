pub mod rtp_codec;

pub use rtp_codec::{RTCRtpCodec, RTCRtpCodecCapability, RtpCodecKind};

use crate::media_stream::track::MediaStreamTrack;
use crate::rtp_transceiver::RTCRtpSenderId;

/// RTPSender is the sending half of a transceiver.
///
/// It carries at most one outgoing track. Senders are handed out as
/// snapshots by [`get_senders`](crate::peer_connection::RTCPeerConnection::get_senders).
///
/// ## Specifications
///
/// * [MDN]
/// * [W3C]
///
/// [MDN]: https://developer.mozilla.org/en-US/docs/Web/API/RTCRtpSender
/// [W3C]: https://w3c.github.io/webrtc-pc/#rtcrtpsender-interface
#[derive(Default, Debug, Clone, PartialEq)]
pub struct RTCRtpSender {
    id: RTCRtpSenderId,
    kind: RtpCodecKind,
    track: Option<MediaStreamTrack>,
}

impl RTCRtpSender {
    pub(crate) fn new(id: RTCRtpSenderId, kind: RtpCodecKind) -> Self {
        Self {
            id,
            kind,
            track: None,
        }
    }

    pub fn id(&self) -> RTCRtpSenderId {
        self.id
    }

    pub fn kind(&self) -> RtpCodecKind {
        self.kind
    }

    /// track returns the outgoing track, or None
    pub fn track(&self) -> Option<&MediaStreamTrack> {
        self.track.as_ref()
    }

    pub(crate) fn set_track(&mut self, track: MediaStreamTrack) {
        self.track = Some(track);
    }
}
