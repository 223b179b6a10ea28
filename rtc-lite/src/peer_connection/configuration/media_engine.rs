//! Codec registry for a peer connection.
//!
//! The media engine holds the codecs a peer connection can send and receive.
//! Each [`RTCPeerConnection`](crate::peer_connection::RTCPeerConnection) owns
//! its own engine, seeded with the default codecs unless the builder is given
//! another one.
//!
//! # Examples
//!
//! ```
//! use rtc_lite::peer_connection::configuration::media_engine::{MediaEngine, MIME_TYPE_OPUS};
//! use rtc_lite::rtp_transceiver::rtp_sender::{RTCRtpCodec, RtpCodecKind};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut media_engine = MediaEngine::default();
//! media_engine.register_default_codecs();
//!
//! let opus = media_engine.get_codec(111)?;
//! assert_eq!(opus.capability.mime_type, MIME_TYPE_OPUS);
//!
//! // a later registration shadows the earlier one for payload type lookups
//! media_engine.register_codec(RTCRtpCodec::new(
//!     RtpCodecKind::Audio,
//!     "opus",
//!     48000,
//!     2,
//!     "minptime=10;useinbandfec=1;stereo=1",
//!     111,
//! ));
//! assert_eq!(
//!     media_engine.get_codec(111)?.capability.sdp_fmtp_line,
//!     "minptime=10;useinbandfec=1;stereo=1"
//! );
//! # Ok(())
//! # }
//! ```

use std::collections::HashSet;

use crate::rtp_transceiver::PayloadType;
use crate::rtp_transceiver::rtp_sender::rtp_codec::{RTCRtpCodec, RtpCodecKind};
use sdp::util::Codec;
use shared::error::{Error, Result};
use unicase::UniCase;

/// H.264 video codec MIME type.
///
/// Note: MIME type matching is case-insensitive.
pub const MIME_TYPE_H264: &str = "video/H264";

/// Opus audio codec MIME type.
pub const MIME_TYPE_OPUS: &str = "audio/opus";

/// VP8 video codec MIME type.
pub const MIME_TYPE_VP8: &str = "video/VP8";

/// MediaEngine defines the codecs supported by a PeerConnection.
///
/// Codecs are kept in registration order. Registering a payload type that is
/// already present is allowed; the later codec shadows the earlier one for
/// every payload type lookup.
#[derive(Default, Debug, Clone)]
pub struct MediaEngine {
    codecs: Vec<RTCRtpCodec>,
}

impl MediaEngine {
    /// Registers opus (111), VP8 (96) and H264 (100).
    pub fn register_default_codecs(&mut self) {
        for codec in [
            RTCRtpCodec::new(
                RtpCodecKind::Audio,
                "opus",
                48000,
                2,
                "minptime=10;useinbandfec=1",
                111,
            ),
            RTCRtpCodec::new(RtpCodecKind::Video, "VP8", 90000, 0, "", 96),
            RTCRtpCodec::new(
                RtpCodecKind::Video,
                "H264",
                90000,
                0,
                "level-asymmetry-allowed=1;packetization-mode=1;profile-level-id=42001f",
                100,
            ),
        ] {
            self.register_codec(codec);
        }
    }

    /// Appends a codec.
    pub fn register_codec(&mut self, codec: RTCRtpCodec) {
        self.codecs.push(codec);
    }

    /// Removes every registered codec.
    pub fn clear_codecs(&mut self) {
        self.codecs.clear();
    }

    /// Every registered codec in registration order, shadowed ones included.
    pub fn codecs(&self) -> &[RTCRtpCodec] {
        &self.codecs
    }

    /// get_codec returns the codec registered last for `payload_type`.
    pub fn get_codec(&self, payload_type: PayloadType) -> Result<RTCRtpCodec> {
        self.codecs
            .iter()
            .rev()
            .find(|codec| codec.payload_type == payload_type)
            .cloned()
            .ok_or(Error::ErrCodecNotFound)
    }

    /// get_codec_sdp finds the local codec matching a codec advertised by the
    /// remote description. Names compare case-insensitively, channels only
    /// when the remote states them.
    pub fn get_codec_sdp(&self, sdp_codec: &Codec) -> Result<RTCRtpCodec> {
        let sdp_name = UniCase::new(sdp_codec.name.as_str());
        let channels = if sdp_codec.encoding_parameters.is_empty() {
            None
        } else {
            Some(sdp_codec.encoding_parameters.parse::<u16>()?)
        };

        self.codecs
            .iter()
            .rev()
            .find(|codec| {
                UniCase::new(codec.name.as_str()) == sdp_name
                    && codec.capability.clock_rate == sdp_codec.clock_rate
                    && channels.is_none_or(|channels| codec.capability.channels == channels)
                    && codec.capability.sdp_fmtp_line == sdp_codec.fmtp
            })
            .cloned()
            .ok_or(Error::ErrCodecNotFound)
    }

    /// get_codecs_by_kind returns the effective codecs of a kind, that is the
    /// codecs not shadowed by a later registration, in registration order.
    pub fn get_codecs_by_kind(&self, kind: RtpCodecKind) -> Vec<RTCRtpCodec> {
        let mut seen = HashSet::new();
        let mut codecs: Vec<RTCRtpCodec> = self
            .codecs
            .iter()
            .rev()
            .filter(|codec| seen.insert(codec.payload_type))
            .filter(|codec| codec.kind == kind)
            .cloned()
            .collect();
        codecs.reverse();
        codecs
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn default_engine() -> MediaEngine {
        let mut m = MediaEngine::default();
        m.register_default_codecs();
        m
    }

    #[test]
    fn test_get_codec() -> Result<()> {
        let m = default_engine();

        let opus = m.get_codec(111)?;
        assert_eq!(opus.kind, RtpCodecKind::Audio);
        assert_eq!(opus.capability.clock_rate, 48000);
        assert_eq!(opus.capability.channels, 2);
        assert_eq!(opus.capability.mime_type, MIME_TYPE_OPUS);

        assert_eq!(m.get_codec(99), Err(Error::ErrCodecNotFound));

        Ok(())
    }

    #[test]
    fn test_register_and_clear_codecs() -> Result<()> {
        let mut m = default_engine();
        assert_eq!(m.codecs().len(), 3);

        m.register_codec(RTCRtpCodec::new(
            RtpCodecKind::Video,
            "VP8",
            90000,
            0,
            "",
            111,
        ));
        assert_eq!(m.get_codec(111)?.kind, RtpCodecKind::Video);
        assert_eq!(m.codecs().len(), 4);

        m.clear_codecs();
        assert!(m.codecs().is_empty());
        assert_eq!(m.get_codec(96), Err(Error::ErrCodecNotFound));

        Ok(())
    }

    #[test]
    fn test_get_codec_sdp() -> Result<()> {
        let m = default_engine();

        let tests = vec![
            (
                "opus with channels",
                Codec {
                    payload_type: 109,
                    name: "OPUS".to_owned(),
                    clock_rate: 48000,
                    encoding_parameters: "2".to_owned(),
                    fmtp: "minptime=10;useinbandfec=1".to_owned(),
                    ..Default::default()
                },
                Some(111),
            ),
            (
                "vp8 without channels",
                Codec {
                    payload_type: 120,
                    name: "vp8".to_owned(),
                    clock_rate: 90000,
                    ..Default::default()
                },
                Some(96),
            ),
            (
                "opus mono",
                Codec {
                    payload_type: 109,
                    name: "opus".to_owned(),
                    clock_rate: 48000,
                    encoding_parameters: "1".to_owned(),
                    fmtp: "minptime=10;useinbandfec=1".to_owned(),
                    ..Default::default()
                },
                None,
            ),
            (
                "h264 other profile",
                Codec {
                    payload_type: 102,
                    name: "H264".to_owned(),
                    clock_rate: 90000,
                    fmtp: "packetization-mode=1;profile-level-id=640032".to_owned(),
                    ..Default::default()
                },
                None,
            ),
        ];

        for (name, sdp_codec, expected) in tests {
            let result = m.get_codec_sdp(&sdp_codec);
            match expected {
                Some(payload_type) => assert_eq!(result?.payload_type, payload_type, "{name}"),
                None => assert_eq!(result, Err(Error::ErrCodecNotFound), "{name}"),
            }
        }

        Ok(())
    }

    #[test]
    fn test_get_codecs_by_kind() {
        let mut m = default_engine();

        let video: Vec<PayloadType> = m
            .get_codecs_by_kind(RtpCodecKind::Video)
            .iter()
            .map(|c| c.payload_type)
            .collect();
        assert_eq!(video, vec![96, 100]);

        // shadow the audio payload type with a video codec
        m.register_codec(RTCRtpCodec::new(
            RtpCodecKind::Video,
            "VP8",
            90000,
            0,
            "",
            111,
        ));
        assert!(m.get_codecs_by_kind(RtpCodecKind::Audio).is_empty());
        assert_eq!(m.get_codecs_by_kind(RtpCodecKind::Video).len(), 3);
    }
}
