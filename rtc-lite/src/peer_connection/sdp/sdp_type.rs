use std::fmt;

use crate::peer_connection::configuration::UNSPECIFIED_STR;
use serde::{Deserialize, Serialize};

/// Role of a session description in an offer/answer exchange.
///
/// `Rollback` is recognised when parsing but cannot be applied; both
/// `set_local_description` and `set_remote_description` reject it.
///
/// ```
/// use rtc_lite::peer_connection::sdp::RTCSdpType;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// assert_eq!(RTCSdpType::from("pranswer"), RTCSdpType::Pranswer);
/// assert_eq!(serde_json::to_string(&RTCSdpType::Offer)?, "\"offer\"");
/// # Ok(())
/// # }
/// ```
///
/// See [RFC 3264](https://datatracker.ietf.org/doc/html/rfc3264) and the
/// [W3C type attribute](https://w3c.github.io/webrtc-pc/#dom-rtcsessiondescription-type).
#[derive(Default, Debug, PartialEq, Eq, Copy, Clone, Serialize, Deserialize)]
pub enum RTCSdpType {
    #[default]
    Unspecified = 0,

    #[serde(rename = "offer")]
    Offer,

    /// A provisional answer. Either side may replace it with another
    /// provisional answer or a final one.
    #[serde(rename = "pranswer")]
    Pranswer,

    /// A final answer, completing the exchange.
    #[serde(rename = "answer")]
    Answer,

    #[serde(rename = "rollback")]
    Rollback,
}

impl RTCSdpType {
    const ALL: [RTCSdpType; 4] = [Self::Offer, Self::Pranswer, Self::Answer, Self::Rollback];

    pub fn as_str(&self) -> &'static str {
        match self {
            RTCSdpType::Offer => "offer",
            RTCSdpType::Pranswer => "pranswer",
            RTCSdpType::Answer => "answer",
            RTCSdpType::Rollback => "rollback",
            RTCSdpType::Unspecified => UNSPECIFIED_STR,
        }
    }

    /// Whether the description answers an offer, provisionally or not.
    pub fn is_answer(&self) -> bool {
        matches!(self, RTCSdpType::Pranswer | RTCSdpType::Answer)
    }
}

impl From<&str> for RTCSdpType {
    fn from(raw: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == raw)
            .unwrap_or_default()
    }
}

impl fmt::Display for RTCSdpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
