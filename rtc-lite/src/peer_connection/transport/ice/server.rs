use std::fmt;

use serde::{Deserialize, Serialize};

use super::url::{RTCIceServerType, RTCIceServerUrl};
use crate::peer_connection::configuration::UNSPECIFIED_STR;
use shared::error::{Error, Result};

/// Kind of credential a TURN server expects.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RTCIceCredentialType {
    /// Treated as [`RTCIceCredentialType::Password`].
    #[default]
    Unspecified,

    /// Username and password.
    #[serde(rename = "password")]
    Password,

    /// OAuth access token.
    #[serde(rename = "oauth")]
    Oauth,
}

const ICE_CREDENTIAL_TYPE_PASSWORD_STR: &str = "password";
const ICE_CREDENTIAL_TYPE_OAUTH_STR: &str = "oauth";

impl From<&str> for RTCIceCredentialType {
    fn from(raw: &str) -> Self {
        match raw {
            ICE_CREDENTIAL_TYPE_PASSWORD_STR => RTCIceCredentialType::Password,
            ICE_CREDENTIAL_TYPE_OAUTH_STR => RTCIceCredentialType::Oauth,
            _ => RTCIceCredentialType::Unspecified,
        }
    }
}

impl fmt::Display for RTCIceCredentialType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            RTCIceCredentialType::Password => ICE_CREDENTIAL_TYPE_PASSWORD_STR,
            RTCIceCredentialType::Oauth => ICE_CREDENTIAL_TYPE_OAUTH_STR,
            RTCIceCredentialType::Unspecified => UNSPECIFIED_STR,
        };
        write!(f, "{s}")
    }
}

/// OAuth credential of a TURN server.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RTCOAuthCredential {
    pub mac_key: String,
    pub access_token: String,
}

/// Credential value of a TURN server, matching its [`RTCIceCredentialType`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RTCIceCredential {
    Password(String),
    Oauth(RTCOAuthCredential),
}

/// ICEServer describes a single STUN and TURN server that can be used by
/// the ICEAgent to establish a connection with a peer.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RTCIceServer {
    pub urls: Vec<String>,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub credential: Option<RTCIceCredential>,
    #[serde(default)]
    pub credential_type: RTCIceCredentialType,
}

impl RTCIceServer {
    /// validate parses every URL and checks TURN credentials.
    pub(crate) fn validate(&self) -> Result<Vec<RTCIceServerUrl>> {
        let mut urls = Vec::with_capacity(self.urls.len());

        for raw in &self.urls {
            let url = RTCIceServerUrl::parse(raw)?;

            if url.server_type == RTCIceServerType::Turn {
                // https://www.w3.org/TR/webrtc/#set-the-configuration (step #11.3.2)
                let Some(credential) = &self.credential else {
                    return Err(Error::ErrNoTurnCredentials);
                };
                if self.username.is_empty() {
                    return Err(Error::ErrNoTurnCredentials);
                }

                // https://www.w3.org/TR/webrtc/#set-the-configuration (step #11.3.3)
                match (self.credential_type, credential) {
                    (
                        RTCIceCredentialType::Unspecified | RTCIceCredentialType::Password,
                        RTCIceCredential::Password(_),
                    )
                    | (RTCIceCredentialType::Oauth, RTCIceCredential::Oauth(_)) => {}
                    _ => return Err(Error::ErrTurnCredentials),
                }
            }

            urls.push(url);
        }

        Ok(urls)
    }
}
