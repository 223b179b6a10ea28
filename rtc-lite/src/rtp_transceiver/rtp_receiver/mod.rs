use crate::media_stream::track::MediaStreamTrack;
use crate::rtp_transceiver::RTCRtpReceiverId;
use crate::rtp_transceiver::rtp_sender::RtpCodecKind;

/// RTPReceiver is the receiving half of a transceiver.
///
/// A receiver created for receive-only negotiation carries a placeholder
/// track of its kind; one created for an outgoing track carries none.
///
/// ## Specifications
///
/// * [MDN]
/// * [W3C]
///
/// [MDN]: https://developer.mozilla.org/en-US/docs/Web/API/RTCRtpReceiver
/// [W3C]: https://w3c.github.io/webrtc-pc/#rtcrtpreceiver-interface
#[derive(Default, Debug, Clone, PartialEq)]
pub struct RTCRtpReceiver {
    id: RTCRtpReceiverId,
    kind: RtpCodecKind,
    track: Option<MediaStreamTrack>,
}

impl RTCRtpReceiver {
    pub(crate) fn new(
        id: RTCRtpReceiverId,
        kind: RtpCodecKind,
        track: Option<MediaStreamTrack>,
    ) -> Self {
        Self { id, kind, track }
    }

    pub fn id(&self) -> RTCRtpReceiverId {
        self.id
    }

    pub fn kind(&self) -> RtpCodecKind {
        self.kind
    }

    /// track returns the incoming track, or None
    pub fn track(&self) -> Option<&MediaStreamTrack> {
        self.track.as_ref()
    }
}
