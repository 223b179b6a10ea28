//! Negotiation policies of a [`RTCConfiguration`](super::RTCConfiguration).
//!
//! Bundle and rtcp-mux policies are frozen once a peer connection has a
//! local description; the ICE transport policy may change at any time.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::UNSPECIFIED_STR;

/// Affects which media tracks are negotiated if the remote endpoint is not
/// bundle-aware.
///
/// Every host interface is its own endpoint, so the policy is negotiated state
/// only.
#[derive(Default, Debug, PartialEq, Eq, Copy, Clone, Serialize, Deserialize)]
pub enum RTCBundlePolicy {
    #[default]
    Unspecified = 0,

    /// One transport per media type in use.
    #[serde(rename = "balanced")]
    Balanced = 1,

    /// One transport per track.
    #[serde(rename = "max-compat")]
    MaxCompat = 2,

    /// A single transport for everything.
    #[serde(rename = "max-bundle")]
    MaxBundle = 3,
}

impl RTCBundlePolicy {
    const ALL: [RTCBundlePolicy; 3] = [Self::Balanced, Self::MaxCompat, Self::MaxBundle];

    pub fn as_str(&self) -> &'static str {
        match self {
            RTCBundlePolicy::Balanced => "balanced",
            RTCBundlePolicy::MaxCompat => "max-compat",
            RTCBundlePolicy::MaxBundle => "max-bundle",
            RTCBundlePolicy::Unspecified => UNSPECIFIED_STR,
        }
    }
}

impl From<&str> for RTCBundlePolicy {
    fn from(raw: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|policy| policy.as_str() == raw)
            .unwrap_or_default()
    }
}

impl fmt::Display for RTCBundlePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Restricts which candidates may be used.
///
/// Only host candidates are gathered, so `Relay` is carried and validated but
/// filters nothing.
#[derive(Default, Debug, PartialEq, Eq, Copy, Clone, Serialize, Deserialize)]
pub enum RTCIceTransportPolicy {
    #[default]
    Unspecified = 0,

    /// Any type of candidate may be used.
    #[serde(rename = "all")]
    All = 1,

    /// Only candidates relayed through a TURN server.
    #[serde(rename = "relay")]
    Relay = 2,
}

impl RTCIceTransportPolicy {
    const ALL: [RTCIceTransportPolicy; 2] = [Self::All, Self::Relay];

    pub fn as_str(&self) -> &'static str {
        match self {
            RTCIceTransportPolicy::All => "all",
            RTCIceTransportPolicy::Relay => "relay",
            RTCIceTransportPolicy::Unspecified => UNSPECIFIED_STR,
        }
    }
}

impl From<&str> for RTCIceTransportPolicy {
    fn from(raw: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|policy| policy.as_str() == raw)
            .unwrap_or_default()
    }
}

impl fmt::Display for RTCIceTransportPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether RTCP shares the RTP transport.
///
/// Descriptions produced by a peer connection always carry `a=rtcp-mux`.
#[derive(Default, Debug, PartialEq, Eq, Copy, Clone, Serialize, Deserialize)]
pub enum RTCRtcpMuxPolicy {
    #[default]
    Unspecified = 0,

    /// Multiplex when the remote side agrees.
    #[serde(rename = "negotiate")]
    Negotiate = 1,

    /// Always multiplex RTCP on the RTP transport.
    #[serde(rename = "require")]
    Require = 2,
}

impl RTCRtcpMuxPolicy {
    const ALL: [RTCRtcpMuxPolicy; 2] = [Self::Negotiate, Self::Require];

    pub fn as_str(&self) -> &'static str {
        match self {
            RTCRtcpMuxPolicy::Negotiate => "negotiate",
            RTCRtcpMuxPolicy::Require => "require",
            RTCRtcpMuxPolicy::Unspecified => UNSPECIFIED_STR,
        }
    }
}

impl From<&str> for RTCRtcpMuxPolicy {
    fn from(raw: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|policy| policy.as_str() == raw)
            .unwrap_or_default()
    }
}

impl fmt::Display for RTCRtcpMuxPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
