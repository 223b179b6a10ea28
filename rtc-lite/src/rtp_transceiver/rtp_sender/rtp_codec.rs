use std::fmt;

use crate::peer_connection::configuration::UNSPECIFIED_STR;
use crate::peer_connection::configuration::media_engine::*;
use crate::rtp_transceiver::PayloadType;
use shared::error::{Error, Result};

/// Codec kind identifying the media type.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RtpCodecKind {
    /// Unspecified or unknown codec type
    #[default]
    Unspecified = 0,

    /// Audio codec
    Audio = 1,

    /// Video codec
    Video = 2,
}

impl From<&str> for RtpCodecKind {
    fn from(raw: &str) -> Self {
        match raw {
            "audio" => RtpCodecKind::Audio,
            "video" => RtpCodecKind::Video,
            _ => RtpCodecKind::Unspecified,
        }
    }
}

impl From<u8> for RtpCodecKind {
    fn from(v: u8) -> Self {
        match v {
            1 => RtpCodecKind::Audio,
            2 => RtpCodecKind::Video,
            _ => RtpCodecKind::Unspecified,
        }
    }
}

impl fmt::Display for RtpCodecKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            RtpCodecKind::Audio => "audio",
            RtpCodecKind::Video => "video",
            RtpCodecKind::Unspecified => UNSPECIFIED_STR,
        };
        write!(f, "{s}")
    }
}

/// RTP codec capability providing information about supported codecs.
///
/// ## Specifications
///
/// * [W3C](https://w3c.github.io/webrtc-pc/#dictionary-rtcrtpcodeccapability-members)
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct RTCRtpCodecCapability {
    /// MIME type of the codec (e.g., "video/VP8", "audio/opus")
    pub mime_type: String,
    /// Codec clock rate in Hz
    pub clock_rate: u32,
    /// Number of audio channels (0 for video codecs)
    pub channels: u16,
    /// Format-specific parameters as SDP fmtp line
    pub sdp_fmtp_line: String,
}

impl RTCRtpCodecCapability {
    /// Creates an RTP payloader for this codec.
    ///
    /// # Errors
    ///
    /// Returns `Error::ErrNoPayloaderForCodec` if no payloader handles the mime type.
    pub fn payloader(&self) -> Result<Box<dyn rtp::packetizer::Payloader + Send + Sync>> {
        let mime_type = self.mime_type.to_lowercase();
        if mime_type == MIME_TYPE_H264.to_lowercase() {
            Ok(Box::<rtp::codecs::h264::H264Payloader>::default())
        } else if mime_type == MIME_TYPE_VP8.to_lowercase() {
            Ok(Box::<rtp::codecs::vp8::Vp8Payloader>::default())
        } else if mime_type == MIME_TYPE_OPUS.to_lowercase() {
            Ok(Box::<rtp::codecs::opus::OpusPayloader>::default())
        } else {
            Err(Error::ErrNoPayloaderForCodec)
        }
    }
}

/// A codec registered in the [`MediaEngine`]: a payload type bound to a
/// capability.
///
/// ```
/// use rtc_lite::rtp_transceiver::rtp_sender::{RTCRtpCodec, RtpCodecKind};
///
/// let vp8 = RTCRtpCodec::new(RtpCodecKind::Video, "VP8", 90000, 0, "", 96);
/// assert_eq!(vp8.capability.mime_type, "video/VP8");
/// assert!(vp8.capability.payloader().is_ok());
/// ```
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct RTCRtpCodec {
    pub payload_type: PayloadType,
    /// Encoding name as it appears in `a=rtpmap`
    pub name: String,
    pub kind: RtpCodecKind,
    pub capability: RTCRtpCodecCapability,
}

impl RTCRtpCodec {
    pub fn new(
        kind: RtpCodecKind,
        name: &str,
        clock_rate: u32,
        channels: u16,
        sdp_fmtp_line: &str,
        payload_type: PayloadType,
    ) -> Self {
        RTCRtpCodec {
            payload_type,
            name: name.to_owned(),
            kind,
            capability: RTCRtpCodecCapability {
                mime_type: format!("{kind}/{name}"),
                clock_rate,
                channels,
                sdp_fmtp_line: sdp_fmtp_line.to_owned(),
            },
        }
    }
}
