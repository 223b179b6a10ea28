use std::net::{IpAddr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use log::{trace, warn};
use rtp::packet::Packet;
use tokio::sync::mpsc;

use super::{Endpoint, EndpointEvent, EndpointEventSender, EndpointFactory, EndpointId};
use crate::peer_connection::transport::dtls::Credential;
use shared::error::{Error, Result};

/// Owns the live endpoints of a peer connection.
///
/// Every add, remove and fan-out happens under the one lock, so a packet is
/// never sent to an endpoint that is half removed.
#[derive(Clone, Default)]
pub(crate) struct EndpointManager {
    endpoints: Arc<RwLock<Vec<(EndpointId, Arc<dyn Endpoint>)>>>,
    next_id: Arc<AtomicUsize>,
}

impl EndpointManager {
    /// gather binds one endpoint per host address and returns their local
    /// addresses in the same order.
    ///
    /// If any bind fails, the endpoints bound by this call are closed again
    /// and the error is returned.
    pub(crate) fn gather(
        &self,
        factory: &dyn EndpointFactory,
        host_addresses: &[IpAddr],
        local_password: &str,
        credential: &Arc<dyn Credential>,
        events_tx: &mpsc::UnboundedSender<(EndpointId, EndpointEvent)>,
    ) -> Result<Vec<SocketAddr>> {
        let mut bound: Vec<(EndpointId, Arc<dyn Endpoint>)> =
            Vec::with_capacity(host_addresses.len());

        for ip in host_addresses {
            let id = self.next_id.fetch_add(1, Ordering::SeqCst);
            let events = EndpointEventSender::new(id, events_tx.clone());
            match factory.bind(*ip, local_password, Arc::clone(credential), events) {
                Ok(endpoint) => {
                    trace!("bound endpoint {} on {}", id, endpoint.local_addr());
                    bound.push((id, endpoint));
                }
                Err(err) => {
                    for (id, endpoint) in bound {
                        if let Err(close_err) = endpoint.close() {
                            warn!("failed to close endpoint {id} after bind error: {close_err}");
                        }
                    }
                    return Err(err);
                }
            }
        }

        let local_addrs = bound.iter().map(|(_, e)| e.local_addr()).collect();
        let mut endpoints = self.endpoints.write()?;
        endpoints.extend(bound);

        Ok(local_addrs)
    }

    /// send fans a packet out to every live endpoint.
    ///
    /// A failing endpoint does not stop the others; its error is logged.
    pub(crate) fn send(&self, packet: &Packet) -> Result<()> {
        let endpoints = self.endpoints.read()?;
        for (id, endpoint) in endpoints.iter() {
            match endpoint.send(packet) {
                Ok(()) => {}
                Err(Error::ErrEndpointClosed) => {
                    trace!("endpoint {id} closed, packet ssrc={} dropped", packet.header.ssrc);
                }
                Err(err) => {
                    warn!("failed to send packet on endpoint {id}: {err}");
                }
            }
        }
        Ok(())
    }

    /// remove takes an endpoint out of the live set without closing it.
    ///
    /// Returns the endpoint if it was live, and whether the set is now empty.
    pub(crate) fn remove(&self, id: EndpointId) -> Result<(Option<Arc<dyn Endpoint>>, bool)> {
        let mut endpoints = self.endpoints.write()?;
        let removed = endpoints
            .iter()
            .position(|(endpoint_id, _)| *endpoint_id == id)
            .map(|i| endpoints.remove(i).1);
        Ok((removed, endpoints.is_empty()))
    }

    /// close_all closes every endpoint and empties the live set.
    ///
    /// All endpoints are closed even if some fail; the first error is returned.
    pub(crate) fn close_all(&self) -> Result<()> {
        let mut endpoints = self.endpoints.write()?;

        let mut first_err = None;
        for (id, endpoint) in endpoints.drain(..) {
            if let Err(err) = endpoint.close() {
                warn!("failed to close endpoint {id}: {err}");
                if first_err.is_none() {
                    first_err = Some(err);
                }
            }
        }

        match first_err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> Result<usize> {
        Ok(self.endpoints.read()?.len())
    }
}
