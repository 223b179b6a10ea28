use std::fmt;

use crate::peer_connection::configuration::UNSPECIFIED_STR;

/// Media flow of a transceiver, as written in the `a=<direction>` line of
/// its media description.
///
/// See [RTCRtpTransceiverDirection](https://www.w3.org/TR/webrtc/#dom-rtcrtptransceiverdirection).
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
pub enum RTCRtpTransceiverDirection {
    #[default]
    Unspecified,

    /// Send and receive.
    Sendrecv,

    /// Send only.
    Sendonly,

    /// Receive only.
    Recvonly,

    /// Neither send nor receive.
    Inactive,
}

const RTP_TRANSCEIVER_DIRECTION_SENDRECV_STR: &str = "sendrecv";
const RTP_TRANSCEIVER_DIRECTION_SENDONLY_STR: &str = "sendonly";
const RTP_TRANSCEIVER_DIRECTION_RECVONLY_STR: &str = "recvonly";
const RTP_TRANSCEIVER_DIRECTION_INACTIVE_STR: &str = "inactive";

impl From<&str> for RTCRtpTransceiverDirection {
    fn from(raw: &str) -> Self {
        match raw {
            RTP_TRANSCEIVER_DIRECTION_SENDRECV_STR => RTCRtpTransceiverDirection::Sendrecv,
            RTP_TRANSCEIVER_DIRECTION_SENDONLY_STR => RTCRtpTransceiverDirection::Sendonly,
            RTP_TRANSCEIVER_DIRECTION_RECVONLY_STR => RTCRtpTransceiverDirection::Recvonly,
            RTP_TRANSCEIVER_DIRECTION_INACTIVE_STR => RTCRtpTransceiverDirection::Inactive,
            _ => RTCRtpTransceiverDirection::Unspecified,
        }
    }
}

impl fmt::Display for RTCRtpTransceiverDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            RTCRtpTransceiverDirection::Sendrecv => RTP_TRANSCEIVER_DIRECTION_SENDRECV_STR,
            RTCRtpTransceiverDirection::Sendonly => RTP_TRANSCEIVER_DIRECTION_SENDONLY_STR,
            RTCRtpTransceiverDirection::Recvonly => RTP_TRANSCEIVER_DIRECTION_RECVONLY_STR,
            RTCRtpTransceiverDirection::Inactive => RTP_TRANSCEIVER_DIRECTION_INACTIVE_STR,
            RTCRtpTransceiverDirection::Unspecified => UNSPECIFIED_STR,
        };
        write!(f, "{s}")
    }
}

impl RTCRtpTransceiverDirection {
    /// The direction the remote side sees: sendonly and recvonly swap.
    pub fn reverse(&self) -> RTCRtpTransceiverDirection {
        match *self {
            RTCRtpTransceiverDirection::Sendonly => RTCRtpTransceiverDirection::Recvonly,
            RTCRtpTransceiverDirection::Recvonly => RTCRtpTransceiverDirection::Sendonly,
            _ => *self,
        }
    }

    /// Sends only where both send, receives only where both receive.
    pub fn intersect(&self, other: RTCRtpTransceiverDirection) -> RTCRtpTransceiverDirection {
        Self::from_send_recv(
            self.has_send() && other.has_send(),
            self.has_recv() && other.has_recv(),
        )
    }

    pub fn from_send_recv(send: bool, recv: bool) -> RTCRtpTransceiverDirection {
        match (send, recv) {
            (true, true) => Self::Sendrecv,
            (true, false) => Self::Sendonly,
            (false, true) => Self::Recvonly,
            (false, false) => Self::Inactive,
        }
    }

    pub fn has_send(&self) -> bool {
        matches!(self, Self::Sendrecv | Self::Sendonly)
    }

    pub fn has_recv(&self) -> bool {
        matches!(self, Self::Sendrecv | Self::Recvonly)
    }

    /// The direction after attaching a sending track to a transceiver whose
    /// sender slot is free. Only recvonly and inactive have a free slot.
    pub(crate) fn with_sending(&self) -> Option<RTCRtpTransceiverDirection> {
        match *self {
            RTCRtpTransceiverDirection::Recvonly => Some(RTCRtpTransceiverDirection::Sendrecv),
            RTCRtpTransceiverDirection::Inactive => Some(RTCRtpTransceiverDirection::Sendonly),
            _ => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use RTCRtpTransceiverDirection::*;

    #[test]
    fn test_rtp_transceiver_direction_string() {
        let tests = vec![
            ("Unspecified", Unspecified),
            ("sendrecv", Sendrecv),
            ("sendonly", Sendonly),
            ("recvonly", Recvonly),
            ("inactive", Inactive),
        ];

        for (direction_string, expected_direction) in tests {
            assert_eq!(
                RTCRtpTransceiverDirection::from(direction_string),
                expected_direction
            );
            assert_eq!(expected_direction.to_string(), direction_string);
        }
    }

    #[test]
    fn test_rtp_transceiver_direction_send_recv() {
        let tests = vec![
            (Unspecified, false, false),
            (Sendrecv, true, true),
            (Sendonly, true, false),
            (Recvonly, false, true),
            (Inactive, false, false),
        ];

        for (d, send, recv) in tests {
            assert_eq!(d.has_send(), send, "{d}");
            assert_eq!(d.has_recv(), recv, "{d}");
            if d != Unspecified {
                assert_eq!(RTCRtpTransceiverDirection::from_send_recv(send, recv), d);
            }
        }
    }

    #[test]
    fn test_rtp_transceiver_direction_answer() {
        // local direction intersected with what the remote offer allows
        let tests = vec![
            ((Recvonly, Sendonly), Recvonly),
            ((Recvonly, Sendrecv), Recvonly),
            ((Sendrecv, Sendonly), Recvonly),
            ((Sendrecv, Recvonly), Sendonly),
            ((Sendonly, Sendonly), Inactive),
            ((Sendrecv, Inactive), Inactive),
        ];

        for ((local, remote), expected_direction) in tests {
            assert_eq!(local.intersect(remote.reverse()), expected_direction);
        }
    }

    #[test]
    fn test_rtp_transceiver_direction_with_sending() {
        let tests = vec![
            (Recvonly, Some(Sendrecv)),
            (Inactive, Some(Sendonly)),
            (Sendrecv, None),
            (Sendonly, None),
            (Unspecified, None),
        ];

        for (d, expected) in tests {
            assert_eq!(d.with_sending(), expected, "{d}");
        }
    }
}
