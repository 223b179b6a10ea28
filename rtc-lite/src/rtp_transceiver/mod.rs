use log::trace;

use crate::media_stream::track::MediaStreamTrack;
use crate::rtp_transceiver::direction::RTCRtpTransceiverDirection;
use crate::rtp_transceiver::rtp_receiver::RTCRtpReceiver;
use crate::rtp_transceiver::rtp_sender::{RTCRtpSender, RtpCodecKind};
use shared::error::{Error, Result};

pub mod direction;
pub mod rtp_receiver;
pub mod rtp_sender;

/// SSRC represents a synchronization source
/// A synchronization source is a randomly chosen
/// value meant to be globally unique within a particular
/// RTP session. Used to identify a single stream of media.
/// <https://tools.ietf.org/html/rfc3550#section-3>
#[allow(clippy::upper_case_acronyms)]
pub type SSRC = u32;

/// PayloadType identifies the format of the RTP payload and determines
/// its interpretation by the application. Each codec in a RTP Session
/// will have a different payload_type
/// <https://tools.ietf.org/html/rfc3550#section-3>
pub type PayloadType = u8;

/// Index of a transceiver within its peer connection. Transceivers are never
/// removed, so an id stays valid for the lifetime of the connection.
pub type RTCRtpTransceiverId = usize;

#[derive(Default, Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub struct RTCRtpSenderId(pub(crate) RTCRtpTransceiverId);

impl RTCRtpSenderId {
    /// The transceiver owning this sender.
    pub fn transceiver_id(&self) -> RTCRtpTransceiverId {
        self.0
    }
}

#[derive(Default, Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub struct RTCRtpReceiverId(pub(crate) RTCRtpTransceiverId);

impl RTCRtpReceiverId {
    /// The transceiver owning this receiver.
    pub fn transceiver_id(&self) -> RTCRtpTransceiverId {
        self.0
    }
}

/// RTPTransceiver represents a combination of an RTPSender and an RTPReceiver that share a common mid.
///
/// ## Specifications
///
/// * [W3C](https://w3c.github.io/webrtc-pc/#rtcrtptransceiver-interface)
#[derive(Default, Debug, Clone, PartialEq)]
pub struct RTCRtpTransceiver {
    id: RTCRtpTransceiverId,
    mid: Option<String>,
    kind: RtpCodecKind,
    sender: RTCRtpSender,
    receiver: RTCRtpReceiver,
    direction: RTCRtpTransceiverDirection,
    current_direction: RTCRtpTransceiverDirection,
    fired_direction: RTCRtpTransceiverDirection,
    stopped: bool,
    has_sent: bool,
}

impl RTCRtpTransceiver {
    pub(crate) fn new(
        id: RTCRtpTransceiverId,
        kind: RtpCodecKind,
        direction: RTCRtpTransceiverDirection,
        receiver_track: Option<MediaStreamTrack>,
    ) -> Self {
        Self {
            id,
            mid: None,
            kind,
            sender: RTCRtpSender::new(RTCRtpSenderId(id), kind),
            receiver: RTCRtpReceiver::new(RTCRtpReceiverId(id), kind, receiver_track),
            direction,
            current_direction: RTCRtpTransceiverDirection::Unspecified,
            fired_direction: RTCRtpTransceiverDirection::Unspecified,
            stopped: false,
            has_sent: false,
        }
    }

    pub fn id(&self) -> RTCRtpTransceiverId {
        self.id
    }

    /// mid gets the Transceiver's mid value. When not already set, this value will be set in create_offer or
    /// set_remote_description.
    pub fn mid(&self) -> Option<&str> {
        self.mid.as_deref()
    }

    pub fn kind(&self) -> RtpCodecKind {
        self.kind
    }

    pub fn sender(&self) -> &RTCRtpSender {
        &self.sender
    }

    pub fn receiver(&self) -> &RTCRtpReceiver {
        &self.receiver
    }

    /// direction returns the RTPTransceiver's desired direction.
    pub fn direction(&self) -> RTCRtpTransceiverDirection {
        self.direction
    }

    /// current_direction returns the RTPTransceiver's current direction as negotiated.
    ///
    /// If this transceiver has never been negotiated this returns [`RTCRtpTransceiverDirection::Unspecified`].
    pub fn current_direction(&self) -> RTCRtpTransceiverDirection {
        self.current_direction
    }

    /// fired_direction is the current direction recorded when the last remote
    /// description was applied.
    pub fn fired_direction(&self) -> RTCRtpTransceiverDirection {
        self.fired_direction
    }

    pub fn stopped(&self) -> bool {
        self.stopped
    }

    /// has_sent is true once the transceiver appeared in an applied local description.
    pub fn has_sent(&self) -> bool {
        self.has_sent
    }

    /// is_reusable_for reports whether add_track may place a track of `kind` on
    /// this transceiver instead of creating a new one.
    pub(crate) fn is_reusable_for(&self, kind: RtpCodecKind) -> bool {
        !self.stopped
            && !self.has_sent
            && self.sender.track().is_none()
            && self
                .receiver
                .track()
                .is_some_and(|track| track.kind() == kind)
    }

    /// set_sending_track attaches an outgoing track and promotes the direction
    /// to include sending. Nothing changes on error.
    pub(crate) fn set_sending_track(&mut self, track: MediaStreamTrack) -> Result<()> {
        let direction = self
            .direction
            .with_sending()
            .ok_or(Error::ErrRTPTransceiverSetSendingInvalidState)?;

        self.sender.set_track(track);
        self.set_direction(direction);
        Ok(())
    }

    pub(crate) fn set_direction(&mut self, direction: RTCRtpTransceiverDirection) {
        let previous = self.direction;
        self.direction = direction;

        if direction != previous {
            trace!(
                "Changing direction of transceiver {} from {previous} to {direction}",
                self.id
            );
        }
    }

    pub(crate) fn set_current_direction(&mut self, d: RTCRtpTransceiverDirection) {
        let previous = self.current_direction;
        self.current_direction = d;

        if d != previous {
            trace!(
                "Changing current direction of transceiver {} from {previous} to {d}",
                self.id
            );
        }
    }

    pub(crate) fn set_fired_direction(&mut self, d: RTCRtpTransceiverDirection) {
        self.fired_direction = d;
    }

    /// set_mid assigns the mid the first time the transceiver is negotiated.
    /// Later calls leave it untouched.
    pub(crate) fn set_mid(&mut self, mid: String) {
        if self.mid.is_none() {
            self.mid = Some(mid);
        }
    }

    pub(crate) fn mark_sent(&mut self) {
        self.has_sent = true;
    }

    /// stop irreversibly stops the RTPTransceiver
    pub(crate) fn stop(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;
        self.direction = RTCRtpTransceiverDirection::Inactive;
        self.current_direction = RTCRtpTransceiverDirection::Inactive;
    }
}

pub(crate) fn find_by_mid(mid: &str, local_transceivers: &[RTCRtpTransceiver]) -> Option<usize> {
    local_transceivers
        .iter()
        .position(|t| t.mid.as_deref() == Some(mid))
}

/// find_unmatched returns the first live transceiver of `kind` that has not
/// been bound to a media section yet.
pub(crate) fn find_unmatched(
    kind: RtpCodecKind,
    local_transceivers: &[RTCRtpTransceiver],
) -> Option<usize> {
    local_transceivers
        .iter()
        .position(|t| t.mid.is_none() && !t.stopped && t.kind == kind)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::rtp_transceiver::rtp_sender::RTCRtpCodec;

    fn video_track(id: &str) -> MediaStreamTrack {
        MediaStreamTrack::new(
            id.to_owned(),
            "stream0".to_owned(),
            1234,
            RTCRtpCodec::new(RtpCodecKind::Video, "VP8", 90000, 0, "", 96),
        )
    }

    #[test]
    fn test_set_sending_track() -> Result<()> {
        let tests = vec![
            (
                RTCRtpTransceiverDirection::Recvonly,
                Some(RTCRtpTransceiverDirection::Sendrecv),
            ),
            (
                RTCRtpTransceiverDirection::Inactive,
                Some(RTCRtpTransceiverDirection::Sendonly),
            ),
            (RTCRtpTransceiverDirection::Sendonly, None),
            (RTCRtpTransceiverDirection::Sendrecv, None),
        ];

        for (direction, expected) in tests {
            let mut t = RTCRtpTransceiver::new(0, RtpCodecKind::Video, direction, None);
            let result = t.set_sending_track(video_track("v0"));
            match expected {
                Some(next) => {
                    result?;
                    assert_eq!(t.direction(), next, "{direction}");
                    assert_eq!(t.sender().track().map(|t| t.id()), Some("v0"));
                }
                None => {
                    assert_eq!(
                        result,
                        Err(Error::ErrRTPTransceiverSetSendingInvalidState),
                        "{direction}"
                    );
                    assert_eq!(t.direction(), direction);
                    assert!(t.sender().track().is_none());
                }
            }
        }

        Ok(())
    }

    #[test]
    fn test_is_reusable_for() {
        let remote_video = Some(MediaStreamTrack::new_remote(RtpCodecKind::Video));

        let t = RTCRtpTransceiver::new(
            0,
            RtpCodecKind::Video,
            RTCRtpTransceiverDirection::Recvonly,
            remote_video.clone(),
        );
        assert!(t.is_reusable_for(RtpCodecKind::Video));
        assert!(!t.is_reusable_for(RtpCodecKind::Audio));

        let mut sent = t.clone();
        sent.mark_sent();
        assert!(!sent.is_reusable_for(RtpCodecKind::Video));

        let mut stopped = t.clone();
        stopped.stop();
        assert!(stopped.stopped());
        assert_eq!(stopped.direction(), RTCRtpTransceiverDirection::Inactive);
        assert!(!stopped.is_reusable_for(RtpCodecKind::Video));

        let no_receiver_track = RTCRtpTransceiver::new(
            1,
            RtpCodecKind::Video,
            RTCRtpTransceiverDirection::Sendonly,
            None,
        );
        assert!(!no_receiver_track.is_reusable_for(RtpCodecKind::Video));
    }

    #[test]
    fn test_find_by_mid() {
        let mut transceivers = vec![
            RTCRtpTransceiver::new(0, RtpCodecKind::Audio, RTCRtpTransceiverDirection::Sendonly, None),
            RTCRtpTransceiver::new(1, RtpCodecKind::Video, RTCRtpTransceiverDirection::Sendonly, None),
        ];
        assert_eq!(find_unmatched(RtpCodecKind::Video, &transceivers), Some(1));

        transceivers[1].set_mid("video".to_owned());
        transceivers[1].set_mid("ignored".to_owned());
        assert_eq!(transceivers[1].mid(), Some("video"));
        assert_eq!(find_by_mid("video", &transceivers), Some(1));
        assert_eq!(find_by_mid("audio", &transceivers), None);
        assert_eq!(find_unmatched(RtpCodecKind::Video, &transceivers), None);
    }
}
