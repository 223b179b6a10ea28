use std::fmt;

use url::Url;

use crate::peer_connection::configuration::UNSPECIFIED_STR;
use shared::error::{Error, Result};

/// Kind of server named by a server URL.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
pub enum RTCIceServerType {
    #[default]
    Unspecified,
    Stun,
    Turn,
}

impl fmt::Display for RTCIceServerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            RTCIceServerType::Stun => "stun",
            RTCIceServerType::Turn => "turn",
            RTCIceServerType::Unspecified => UNSPECIFIED_STR,
        };
        write!(f, "{s}")
    }
}

/// Transport requested with `?transport=` on a TURN URL.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
pub enum RTCIceProtoType {
    #[default]
    Unspecified,
    Udp,
    Tcp,
}

impl From<&str> for RTCIceProtoType {
    fn from(raw: &str) -> Self {
        match raw.to_lowercase().as_str() {
            "udp" => RTCIceProtoType::Udp,
            "tcp" => RTCIceProtoType::Tcp,
            _ => RTCIceProtoType::Unspecified,
        }
    }
}

impl fmt::Display for RTCIceProtoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            RTCIceProtoType::Udp => "udp",
            RTCIceProtoType::Tcp => "tcp",
            RTCIceProtoType::Unspecified => UNSPECIFIED_STR,
        };
        write!(f, "{s}")
    }
}

/// A parsed `stun:`, `stuns:`, `turn:` or `turns:` server URL.
///
/// ```
/// use rtc_lite::peer_connection::transport::ice::url::{
///     RTCIceProtoType, RTCIceServerType, RTCIceServerUrl,
/// };
///
/// let url = RTCIceServerUrl::parse("turns:turn.example.com:5349?transport=tcp").unwrap();
/// assert_eq!(url.server_type, RTCIceServerType::Turn);
/// assert!(url.secure);
/// assert_eq!(url.port, 5349);
/// assert_eq!(url.proto, RTCIceProtoType::Tcp);
/// ```
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct RTCIceServerUrl {
    pub server_type: RTCIceServerType,
    pub secure: bool,
    pub host: String,
    pub port: u16,
    pub proto: RTCIceProtoType,
}

impl fmt::Display for RTCIceServerUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scheme = if self.secure {
            format!("{}s", self.server_type)
        } else {
            self.server_type.to_string()
        };
        if self.host.contains(':') {
            write!(f, "{scheme}:[{}]:{}", self.host, self.port)?;
        } else {
            write!(f, "{scheme}:{}:{}", self.host, self.port)?;
        }
        if self.proto != RTCIceProtoType::Unspecified {
            write!(f, "?transport={}", self.proto)?;
        }
        Ok(())
    }
}

impl RTCIceServerUrl {
    /// parse reads `scheme:host:port[?transport=udp|tcp]`.
    ///
    /// Every malformed input fails with [`Error::ErrServerAddr`], whichever
    /// part is wrong.
    pub fn parse(raw: &str) -> Result<Self> {
        let url = Url::parse(raw).map_err(|_| Error::ErrServerAddr)?;

        let (server_type, secure) = match url.scheme() {
            "stun" => (RTCIceServerType::Stun, false),
            "stuns" => (RTCIceServerType::Stun, true),
            "turn" => (RTCIceServerType::Turn, false),
            "turns" => (RTCIceServerType::Turn, true),
            _ => return Err(Error::ErrServerAddr),
        };

        let proto = match url.query() {
            None => RTCIceProtoType::Unspecified,
            Some(_) if server_type == RTCIceServerType::Stun => {
                return Err(Error::ErrServerAddr);
            }
            Some(query) => {
                let Some((key, value)) = query.split_once('=') else {
                    return Err(Error::ErrServerAddr);
                };
                if !key.eq_ignore_ascii_case("transport") {
                    return Err(Error::ErrServerAddr);
                }
                match RTCIceProtoType::from(value) {
                    RTCIceProtoType::Unspecified => return Err(Error::ErrServerAddr),
                    proto => proto,
                }
            }
        };

        // stun/turn URLs carry no authority, host and port are the opaque path
        let (host, port) = split_host_port(url.path())?;

        Ok(RTCIceServerUrl {
            server_type,
            secure,
            host,
            port,
            proto,
        })
    }
}

fn split_host_port(address: &str) -> Result<(String, u16)> {
    let (host, port) = if let Some(rest) = address.strip_prefix('[') {
        // IPv6: [::1]:3478
        let Some((host, tail)) = rest.split_once(']') else {
            return Err(Error::ErrServerAddr);
        };
        let Some(port) = tail.strip_prefix(':') else {
            return Err(Error::ErrServerAddr);
        };
        (host, port)
    } else {
        let Some((host, port)) = address.rsplit_once(':') else {
            return Err(Error::ErrServerAddr);
        };
        if host.contains(':') {
            return Err(Error::ErrServerAddr);
        }
        (host, port)
    };

    if host.is_empty() {
        return Err(Error::ErrServerAddr);
    }
    let port = port.parse::<u16>().map_err(|_| Error::ErrServerAddr)?;

    Ok((host.to_lowercase(), port))
}

#[cfg(test)]
mod test {
    use super::*;
    use shared::error::ErrorKind;

    #[test]
    fn test_parse_url_success() -> Result<()> {
        let tests = vec![
            (
                "stun:stun.example.com:19302",
                RTCIceServerType::Stun,
                false,
                "stun.example.com",
                19302,
                RTCIceProtoType::Unspecified,
            ),
            (
                "STUNS:Stun.Example.com:5349",
                RTCIceServerType::Stun,
                true,
                "stun.example.com",
                5349,
                RTCIceProtoType::Unspecified,
            ),
            (
                "turn:turn.example.com:3478?transport=udp",
                RTCIceServerType::Turn,
                false,
                "turn.example.com",
                3478,
                RTCIceProtoType::Udp,
            ),
            (
                "turns:turn.example.com:5349?transport=tcp",
                RTCIceServerType::Turn,
                true,
                "turn.example.com",
                5349,
                RTCIceProtoType::Tcp,
            ),
            (
                "turn:[::1]:3478?transport=TCP",
                RTCIceServerType::Turn,
                false,
                "::1",
                3478,
                RTCIceProtoType::Tcp,
            ),
            (
                "stun:192.168.1.1:3478",
                RTCIceServerType::Stun,
                false,
                "192.168.1.1",
                3478,
                RTCIceProtoType::Unspecified,
            ),
        ];

        for (raw, server_type, secure, host, port, proto) in tests {
            let url = RTCIceServerUrl::parse(raw)?;
            assert_eq!(url.server_type, server_type, "{raw}");
            assert_eq!(url.secure, secure, "{raw}");
            assert_eq!(url.host, host, "{raw}");
            assert_eq!(url.port, port, "{raw}");
            assert_eq!(url.proto, proto, "{raw}");
        }

        Ok(())
    }

    #[test]
    fn test_parse_url_failure() {
        let tests = vec![
            "stun:host?transport=udp",
            "stun:stun.example.com:3478?transport=udp",
            "stun:stun.example.com",
            "stun:stun.example.com:",
            "stun::3478",
            "stun:stun.example.com:port",
            "stun:stun.example.com:70000",
            "turn:turn.example.com:3478?transport=sctp",
            "turn:turn.example.com:3478?proto=udp",
            "turn:turn.example.com:3478?transport",
            "turn:[::1:3478",
            "http:example.com:80",
            "stun.example.com:3478",
            "",
        ];

        for raw in tests {
            let result = RTCIceServerUrl::parse(raw);
            assert_eq!(result, Err(Error::ErrServerAddr), "{raw}");
        }
        assert_eq!(Error::ErrServerAddr.kind(), ErrorKind::Syntax);
    }

    #[test]
    fn test_url_display() -> Result<()> {
        let tests = vec![
            "stun:stun.example.com:19302",
            "turns:turn.example.com:5349?transport=tcp",
            "turn:[::1]:3478",
        ];

        for raw in tests {
            assert_eq!(RTCIceServerUrl::parse(raw)?.to_string(), raw);
        }

        Ok(())
    }
}
