//! Session descriptions exchanged during offer/answer.
//!
//! [`RTCSessionDescription`] is what applications pass around; the rendering
//! of local descriptions and the reading of remote media sections live here
//! too.
//!
//! Every media section a peer connection renders follows the same attribute
//! order:
//!
//! ```text
//! a=ice-options:trickle                  (session level)
//! a=msid-semantic: WMS <stream labels>   (session level)
//!
//! m=<kind> 9 UDP/TLS/RTP/SAVPF <payload types>
//! c=IN IP4 0.0.0.0
//! a=setup:active
//! a=mid:<mid>
//! a=<direction>
//! a=ice-ufrag:<16 chars>
//! a=ice-pwd:<32 chars>
//! a=ice-lite
//! a=fingerprint:sha-256 <fingerprint>
//! a=rtcp-mux
//! a=rtcp-rsize
//! a=rtpmap / a=fmtp per codec
//! a=ssrc lines of the outgoing track, if any
//! a=candidate per host candidate
//! a=end-of-candidates
//! ```

pub mod sdp_type;
pub mod session_description;

pub use sdp_type::RTCSdpType;
pub use session_description::RTCSessionDescription;

use log::debug;
use sdp::description::session::{
    ATTR_KEY_CONNECTION_SETUP, ATTR_KEY_END_OF_CANDIDATES, ATTR_KEY_ICELITE, ATTR_KEY_INACTIVE,
    ATTR_KEY_MID, ATTR_KEY_MSID_SEMANTIC, ATTR_KEY_RECV_ONLY, ATTR_KEY_RTCPMUX,
    ATTR_KEY_RTCPRSIZE, ATTR_KEY_SEND_ONLY, ATTR_KEY_SEND_RECV, ATTR_KEY_SSRC,
    SEMANTIC_TOKEN_WEBRTC_MEDIA_STREAMS,
};
use sdp::util::ConnectionRole;
use sdp::{MediaDescription, SessionDescription};

use crate::media_stream::track::MediaStreamTrack;
use crate::peer_connection::configuration::media_engine::MediaEngine;
use crate::peer_connection::transport::dtls::RTCDtlsFingerprint;
use crate::peer_connection::transport::ice::RTCIceCandidate;
use crate::rtp_transceiver::{PayloadType, SSRC};
use crate::rtp_transceiver::direction::RTCRtpTransceiverDirection;
use crate::rtp_transceiver::rtp_sender::{RTCRtpCodec, RtpCodecKind};

const ATTR_KEY_ICE_OPTIONS: &str = "ice-options";
const ICE_OPTION_TRICKLE: &str = "trickle";

/// One `m=` section of a local description.
#[derive(Default, Debug, Clone)]
pub(crate) struct MediaSection {
    pub(crate) mid: String,
    pub(crate) kind: RtpCodecKind,
    pub(crate) direction: RTCRtpTransceiverDirection,
    pub(crate) codecs: Vec<RTCRtpCodec>,
    pub(crate) track: Option<MediaStreamTrack>,
}

/// Values shared by every media section of a local description.
pub(crate) struct PopulateSdpParams<'a> {
    pub(crate) identity: bool,
    pub(crate) ice_ufrag: &'a str,
    pub(crate) ice_pwd: &'a str,
    pub(crate) fingerprint: &'a RTCDtlsFingerprint,
    pub(crate) candidates: &'a [RTCIceCandidate],
}

/// populate_sdp renders a local description with one media description per
/// section, in order.
pub(crate) fn populate_sdp(
    media_sections: &[MediaSection],
    params: &PopulateSdpParams<'_>,
) -> SessionDescription {
    let mut stream_labels: Vec<&str> = vec![];
    let mut media_descriptions = Vec::with_capacity(media_sections.len());

    for section in media_sections {
        let mut media =
            MediaDescription::new_jsep_media_description(section.kind.to_string(), vec![])
                .with_value_attribute(
                    ATTR_KEY_CONNECTION_SETUP.to_owned(),
                    ConnectionRole::Active.to_string(),
                )
                .with_value_attribute(ATTR_KEY_MID.to_owned(), section.mid.clone())
                .with_property_attribute(section.direction.to_string())
                .with_ice_credentials(params.ice_ufrag.to_owned(), params.ice_pwd.to_owned())
                .with_property_attribute(ATTR_KEY_ICELITE.to_owned())
                .with_fingerprint(
                    params.fingerprint.algorithm.clone(),
                    params.fingerprint.value.clone(),
                )
                .with_property_attribute(ATTR_KEY_RTCPMUX.to_owned())
                .with_property_attribute(ATTR_KEY_RTCPRSIZE.to_owned());

        for codec in &section.codecs {
            media = media.with_codec(
                codec.payload_type,
                codec.name.clone(),
                codec.capability.clock_rate,
                codec.capability.channels,
                codec.capability.sdp_fmtp_line.clone(),
            );
        }

        if let Some(track) = &section.track {
            media = media.with_media_source(
                track.ssrc(),
                track.label().to_owned(),
                track.label().to_owned(),
                track.id().to_owned(),
            );
            if !stream_labels.contains(&track.label()) {
                stream_labels.push(track.label());
            }
        }

        for candidate in params.candidates {
            media = media.with_candidate(candidate.to_string());
        }

        media_descriptions
            .push(media.with_property_attribute(ATTR_KEY_END_OF_CANDIDATES.to_owned()));
    }

    let mut msid_semantic = format!(" {SEMANTIC_TOKEN_WEBRTC_MEDIA_STREAMS}");
    for label in &stream_labels {
        msid_semantic += " ";
        msid_semantic += label;
    }

    let mut d = SessionDescription::new_jsep_session_description(params.identity)
        .with_value_attribute(ATTR_KEY_ICE_OPTIONS.to_owned(), ICE_OPTION_TRICKLE.to_owned())
        .with_value_attribute(ATTR_KEY_MSID_SEMANTIC.to_owned(), msid_semantic);
    for media in media_descriptions {
        d = d.with_media(media);
    }
    d
}

pub(crate) fn get_mid_value(media: &MediaDescription) -> Option<&str> {
    media.attribute(ATTR_KEY_MID).flatten()
}

pub(crate) fn get_media_kind(media: &MediaDescription) -> RtpCodecKind {
    RtpCodecKind::from(media.media_name.media.as_str())
}

/// get_peer_direction reads the direction attribute of a remote media
/// section. A section without one is sendrecv.
pub(crate) fn get_peer_direction(media: &MediaDescription) -> RTCRtpTransceiverDirection {
    for a in &media.attributes {
        if a.value.is_none()
            && [
                ATTR_KEY_SEND_RECV,
                ATTR_KEY_SEND_ONLY,
                ATTR_KEY_RECV_ONLY,
                ATTR_KEY_INACTIVE,
            ]
            .contains(&a.key.as_str())
        {
            return RTCRtpTransceiverDirection::from(a.key.as_str());
        }
    }
    RTCRtpTransceiverDirection::Sendrecv
}

/// codecs_from_media_description returns the local codecs matching the
/// formats of a remote media section, renumbered to the remote payload types
/// and kept in the remote order. Formats without a local match are skipped.
pub(crate) fn codecs_from_media_description(
    media: &MediaDescription,
    media_engine: &MediaEngine,
) -> Vec<RTCRtpCodec> {
    // payload types resolve against this section only
    let s = SessionDescription {
        media_descriptions: vec![media.clone()],
        ..Default::default()
    };

    let mut codecs = vec![];
    for format in &media.media_name.formats {
        let Ok(payload_type) = format.parse::<PayloadType>() else {
            debug!("skipping non numeric format {format}");
            continue;
        };
        let Ok(sdp_codec) = s.get_codec_for_payload_type(payload_type) else {
            debug!("no rtpmap for payload type {payload_type}");
            continue;
        };
        if let Ok(mut codec) = media_engine.get_codec_sdp(&sdp_codec) {
            codec.payload_type = payload_type;
            codecs.push(codec);
        }
    }
    codecs
}

/// get_ssrc_msid returns the stream label and track id announced for `ssrc`
/// by an `a=ssrc:<ssrc> msid:<label> <id>` line of the remote description.
pub(crate) fn get_ssrc_msid(d: &SessionDescription, ssrc: SSRC) -> Option<(String, String)> {
    let prefix = format!("{ssrc} msid:");
    d.media_descriptions
        .iter()
        .flat_map(|media| &media.attributes)
        .filter(|a| a.key == ATTR_KEY_SSRC)
        .filter_map(|a| a.value.as_deref()?.strip_prefix(prefix.as_str()))
        .find_map(|msid| {
            let (label, id) = msid.split_once(' ')?;
            Some((label.to_owned(), id.to_owned()))
        })
}
