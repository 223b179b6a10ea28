//! Transport endpoints.
//!
//! An endpoint is one bound local socket speaking ICE-lite and the secure
//! transport on behalf of the peer connection. Endpoints are created by an
//! [`EndpointFactory`] during candidate gathering and report incoming media
//! and liveness changes through their [`EndpointEventSender`].

mod manager;

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use rtp::packet::Packet;
use tokio::sync::mpsc;

use crate::peer_connection::transport::dtls::Credential;
use crate::peer_connection::transport::ice::RTCIceTransportState;
use shared::error::{Error, Result};

pub(crate) use manager::EndpointManager;

/// Identifies an endpoint for the lifetime of its peer connection.
pub type EndpointId = usize;

/// Something an endpoint observed.
#[derive(Debug, Clone, PartialEq)]
pub enum EndpointEvent {
    /// An RTP packet arrived from the remote peer.
    Packet(Packet),

    /// The endpoint's liveness changed.
    StateChange(RTCIceTransportState),
}

/// Channel an endpoint reports its [`EndpointEvent`]s on.
///
/// Events of all endpoints of a peer connection are handled by one task, in
/// the order they were sent.
#[derive(Debug, Clone)]
pub struct EndpointEventSender {
    id: EndpointId,
    tx: mpsc::UnboundedSender<(EndpointId, EndpointEvent)>,
}

impl EndpointEventSender {
    pub(crate) fn new(
        id: EndpointId,
        tx: mpsc::UnboundedSender<(EndpointId, EndpointEvent)>,
    ) -> Self {
        Self { id, tx }
    }

    pub fn id(&self) -> EndpointId {
        self.id
    }

    /// Hands an incoming packet to the peer connection.
    ///
    /// Fails with [`Error::ErrConnectionClosed`] once the peer connection is
    /// gone.
    pub fn send_packet(&self, packet: Packet) -> Result<()> {
        self.send(EndpointEvent::Packet(packet))
    }

    /// Reports a liveness change.
    pub fn set_state(&self, state: RTCIceTransportState) -> Result<()> {
        self.send(EndpointEvent::StateChange(state))
    }

    fn send(&self, event: EndpointEvent) -> Result<()> {
        self.tx
            .send((self.id, event))
            .map_err(|_| Error::ErrConnectionClosed)
    }
}

/// A bound local transport endpoint.
pub trait Endpoint: Send + Sync {
    fn local_addr(&self) -> SocketAddr;

    /// Sends an outgoing packet to the remote peer.
    ///
    /// Returns [`Error::ErrEndpointClosed`] after [`close`](Endpoint::close).
    fn send(&self, packet: &Packet) -> Result<()>;

    fn close(&self) -> Result<()>;
}

/// Binds endpoints on local addresses.
pub trait EndpointFactory: Send + Sync {
    /// bind opens an endpoint on `local_ip` with an OS assigned port.
    ///
    /// `local_password` is the ICE-lite password connectivity checks are
    /// verified against; `credential` is the certificate the secure transport
    /// presents.
    fn bind(
        &self,
        local_ip: IpAddr,
        local_password: &str,
        credential: Arc<dyn Credential>,
        events: EndpointEventSender,
    ) -> Result<Arc<dyn Endpoint>>;
}
