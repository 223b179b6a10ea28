use crate::rtp_transceiver::rtp_sender::rtp_codec::{RTCRtpCodec, RtpCodecKind};
use crate::rtp_transceiver::{PayloadType, SSRC};
use shared::util::math_rand_alpha;

pub type MediaStreamTrackId = String;

/// A unit of media flowing in one direction.
///
/// The label doubles as the media stream id: it is written as the `cname`,
/// `msid` stream and `mslabel` of the track's media description.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct MediaStreamTrack {
    id: MediaStreamTrackId,
    label: String,
    ssrc: SSRC,
    codec: RTCRtpCodec,
}

impl MediaStreamTrack {
    pub fn new(id: MediaStreamTrackId, label: String, ssrc: SSRC, codec: RTCRtpCodec) -> Self {
        Self {
            id,
            label,
            ssrc,
            codec,
        }
    }

    /// Placeholder receiver track for a transceiver that has not seen media yet.
    pub(crate) fn new_remote(kind: RtpCodecKind) -> Self {
        Self {
            id: math_rand_alpha(16),
            label: format!("remote {kind}"),
            ssrc: 0,
            codec: RTCRtpCodec {
                kind,
                ..Default::default()
            },
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> RtpCodecKind {
        self.codec.kind
    }

    pub fn payload_type(&self) -> PayloadType {
        self.codec.payload_type
    }

    pub fn ssrc(&self) -> SSRC {
        self.ssrc
    }

    pub fn codec(&self) -> &RTCRtpCodec {
        &self.codec
    }
}
