use std::fmt;
use std::net::SocketAddr;

const HOST_CANDIDATE_FOUNDATION: &str = "udpcandidate";

/// A local host candidate, one per bound transport endpoint.
///
/// Rendered as the value of an `a=candidate:` line:
/// `udpcandidate <id> udp <priority> <ip> <port> typ host`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RTCIceCandidate {
    pub id: usize,
    pub priority: u16,
    pub address: SocketAddr,
}

impl fmt::Display for RTCIceCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{HOST_CANDIDATE_FOUNDATION} {} udp {} {} {} typ host",
            self.id,
            self.priority,
            self.address.ip(),
            self.address.port(),
        )
    }
}

/// host_candidates numbers candidates from 1 and gives each the priority
/// following the previous one, starting at `base_priority`.
pub(crate) fn host_candidates(
    local_addrs: impl IntoIterator<Item = SocketAddr>,
    base_priority: u16,
) -> Vec<RTCIceCandidate> {
    let mut priority = base_priority;
    local_addrs
        .into_iter()
        .enumerate()
        .map(|(i, address)| {
            let candidate = RTCIceCandidate {
                id: i + 1,
                priority,
                address,
            };
            priority = priority.wrapping_add(1);
            candidate
        })
        .collect()
}
