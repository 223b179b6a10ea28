use std::fmt::Display;
use std::io::Cursor;

use sdp::description::session::SessionDescription;
use serde::{Deserialize, Serialize};

use super::sdp_type::RTCSdpType;
use shared::error::Result;

/// Represents a session description in the SDP offer/answer model.
///
/// The session description consists of:
///
/// - **`sdp_type`**: The type of description ([`RTCSdpType`])
/// - **`sdp`**: The SDP content as a string
/// - **`parsed`**: Internal cached parsed representation (not serialized)
///
/// Descriptions serialize to the JSON shape browsers exchange over signaling
/// channels: `{"type":"offer","sdp":"v=0\r\n..."}`.
///
/// # Examples
///
/// ```
/// use rtc_lite::peer_connection::sdp::{RTCSessionDescription, RTCSdpType};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let sdp = "v=0\r\n\
///            o=- 123456789 2 IN IP4 0.0.0.0\r\n\
///            s=-\r\n\
///            t=0 0\r\n\
///            m=audio 9 UDP/TLS/RTP/SAVPF 111\r\n\
///            a=rtpmap:111 opus/48000/2\r\n";
///
/// let offer = RTCSessionDescription::offer(sdp.to_owned())?;
/// assert_eq!(offer.sdp_type, RTCSdpType::Offer);
///
/// let parsed = offer.unmarshal()?;
/// assert_eq!(parsed.media_descriptions.len(), 1);
///
/// let json = serde_json::to_string(&offer)?;
/// let received: RTCSessionDescription = serde_json::from_str(&json)?;
/// assert_eq!(received.sdp, offer.sdp);
/// # Ok(())
/// # }
/// ```
///
/// # Specifications
///
/// - [W3C RTCSessionDescription]
/// - [RFC 3264] - Offer/Answer Model with SDP
///
/// [W3C RTCSessionDescription]: https://w3c.github.io/webrtc-pc/#rtcsessiondescription-class
/// [RFC 3264]: https://datatracker.ietf.org/doc/html/rfc3264
#[derive(Default, Debug, Clone, Serialize, Deserialize)]
pub struct RTCSessionDescription {
    /// The type of this session description (offer, answer, pranswer, or rollback).
    #[serde(rename = "type")]
    pub sdp_type: RTCSdpType,

    /// The SDP content as a string.
    pub sdp: String,

    /// Parsed form of `sdp`, filled by the constructors and by the peer
    /// connection when a description is applied.
    #[serde(skip)]
    pub(crate) parsed: Option<SessionDescription>,
}

impl PartialEq for RTCSessionDescription {
    fn eq(&self, other: &Self) -> bool {
        self.sdp_type == other.sdp_type && self.sdp == other.sdp
    }
}

impl Display for RTCSessionDescription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "type: {}, sdp:\n{}",
            self.sdp_type,
            self.sdp.replace("\r\n", "\n")
        )
    }
}

impl RTCSessionDescription {
    /// Creates an answer session description from SDP text.
    ///
    /// Fails if the text does not parse.
    pub fn answer(sdp: String) -> Result<RTCSessionDescription> {
        Self::new(RTCSdpType::Answer, sdp)
    }

    /// Creates an offer session description from SDP text.
    ///
    /// Fails if the text does not parse.
    pub fn offer(sdp: String) -> Result<RTCSessionDescription> {
        Self::new(RTCSdpType::Offer, sdp)
    }

    /// Creates a provisional answer session description from SDP text.
    ///
    /// Fails if the text does not parse.
    pub fn pranswer(sdp: String) -> Result<RTCSessionDescription> {
        Self::new(RTCSdpType::Pranswer, sdp)
    }

    fn new(sdp_type: RTCSdpType, sdp: String) -> Result<RTCSessionDescription> {
        let mut desc = RTCSessionDescription {
            sdp,
            sdp_type,
            parsed: None,
        };

        let parsed = desc.unmarshal()?;
        desc.parsed = Some(parsed);

        Ok(desc)
    }

    /// Wraps an already rendered description.
    pub(crate) fn from_parsed(sdp_type: RTCSdpType, parsed: SessionDescription) -> Self {
        RTCSessionDescription {
            sdp_type,
            sdp: parsed.marshal(),
            parsed: Some(parsed),
        }
    }

    /// Parses the SDP text into a structured format.
    ///
    /// This parses the text each time it is called.
    pub fn unmarshal(&self) -> Result<SessionDescription> {
        let mut reader = Cursor::new(self.sdp.as_bytes());
        let parsed = SessionDescription::unmarshal(&mut reader)?;
        Ok(parsed)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const MINIMAL_SDP: &str = "v=0\r\no=- 1 2 IN IP4 0.0.0.0\r\ns=-\r\nt=0 0\r\n";

    #[test]
    fn test_session_description_json() {
        let tests = vec![
            (RTCSdpType::Offer, r#"{"type":"offer","sdp":"sdp"}"#),
            (RTCSdpType::Pranswer, r#"{"type":"pranswer","sdp":"sdp"}"#),
            (RTCSdpType::Answer, r#"{"type":"answer","sdp":"sdp"}"#),
            (RTCSdpType::Rollback, r#"{"type":"rollback","sdp":"sdp"}"#),
            (
                RTCSdpType::Unspecified,
                r#"{"type":"Unspecified","sdp":"sdp"}"#,
            ),
        ];

        for (sdp_type, expected_string) in tests {
            let desc = RTCSessionDescription {
                sdp_type,
                sdp: "sdp".to_owned(),
                parsed: None,
            };
            let result = serde_json::to_string(&desc);
            assert!(result.is_ok(), "testCase: marshal err: {result:?}");
            let desc_data = result.unwrap();
            assert_eq!(desc_data, expected_string, "string is not expected");

            let result = serde_json::from_str::<RTCSessionDescription>(&desc_data);
            assert!(result.is_ok(), "testCase: unmarshal err: {result:?}");
            if let Ok(sd) = result {
                assert_eq!(sd, desc);
                assert!(sd.parsed.is_none());
            }
        }
    }

    #[test]
    fn test_session_description_constructors() -> Result<()> {
        let tests = vec![
            (RTCSessionDescription::offer(MINIMAL_SDP.to_owned())?, RTCSdpType::Offer),
            (RTCSessionDescription::answer(MINIMAL_SDP.to_owned())?, RTCSdpType::Answer),
            (
                RTCSessionDescription::pranswer(MINIMAL_SDP.to_owned())?,
                RTCSdpType::Pranswer,
            ),
        ];

        for (desc, expected_type) in tests {
            assert_eq!(desc.sdp_type, expected_type);
            assert!(desc.parsed.is_some());
            assert_eq!(desc.unmarshal()?.marshal(), MINIMAL_SDP);
        }

        assert!(RTCSessionDescription::offer("bogus".to_owned()).is_err());

        Ok(())
    }

    #[test]
    fn test_session_description_display() -> Result<()> {
        let desc = RTCSessionDescription::answer(MINIMAL_SDP.to_owned())?;
        assert_eq!(
            desc.to_string(),
            "type: answer, sdp:\nv=0\no=- 1 2 IN IP4 0.0.0.0\ns=-\nt=0 0\n"
        );

        Ok(())
    }
}
