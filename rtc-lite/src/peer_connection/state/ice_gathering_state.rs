use crate::peer_connection::configuration::UNSPECIFIED_STR;
use std::fmt;

/// Describes the progress of host candidate gathering.
///
/// Gathering happens at most once per connection, the first time an offer or
/// answer is created. It is synchronous: every host interface is bound before
/// the description is rendered, so a description always carries the complete
/// candidate list followed by `a=end-of-candidates`.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
pub enum RTCIceGatheringState {
    #[default]
    Unspecified,

    /// No offer or answer has been created yet.
    New,

    /// Host interfaces are being bound.
    Gathering,

    /// Every host interface has been bound.
    Complete,
}

impl RTCIceGatheringState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RTCIceGatheringState::New => "new",
            RTCIceGatheringState::Gathering => "gathering",
            RTCIceGatheringState::Complete => "complete",
            RTCIceGatheringState::Unspecified => UNSPECIFIED_STR,
        }
    }
}

impl From<&str> for RTCIceGatheringState {
    fn from(raw: &str) -> Self {
        [Self::New, Self::Gathering, Self::Complete]
            .into_iter()
            .find(|state| state.as_str() == raw)
            .unwrap_or_default()
    }
}

impl fmt::Display for RTCIceGatheringState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_ice_gathering_state_names() {
        let tests = vec![
            ("new", RTCIceGatheringState::New),
            ("gathering", RTCIceGatheringState::Gathering),
            ("complete", RTCIceGatheringState::Complete),
            ("completed", RTCIceGatheringState::Unspecified),
        ];

        for (state_string, expected_state) in tests {
            assert_eq!(RTCIceGatheringState::from(state_string), expected_state);
        }
        assert_eq!(RTCIceGatheringState::Gathering.to_string(), "gathering");
    }
}
