/// Options for [`create_answer`](crate::peer_connection::RTCPeerConnection::create_answer).
///
/// ```
/// use rtc_lite::peer_connection::configuration::RTCAnswerOptions;
///
/// let options = RTCAnswerOptions {
///     provisional: true,
///     ..Default::default()
/// };
/// assert!(!options.voice_activity_detection);
/// ```
#[derive(Default, Debug, PartialEq, Eq, Copy, Clone)]
pub struct RTCAnswerOptions {
    /// Voice activity detection for audio tracks. Accepted and ignored.
    pub voice_activity_detection: bool,

    /// Produce a provisional answer (`pranswer`) instead of a final one.
    pub provisional: bool,
}

/// Options for [`create_offer`](crate::peer_connection::RTCPeerConnection::create_offer).
///
/// ## Specifications
///
/// * [W3C RTCOfferOptions](https://w3c.github.io/webrtc-pc/#dictionary-rtcofferoptions-members)
#[derive(Default, Debug, PartialEq, Eq, Copy, Clone)]
pub struct RTCOfferOptions {
    /// Voice activity detection for audio tracks. Accepted and ignored.
    pub voice_activity_detection: bool,

    /// Restart ICE with fresh credentials. Endpoints are gathered once per
    /// connection, so a restart is rejected as not supported.
    pub ice_restart: bool,
}
