#![allow(dead_code)]

use std::net::{IpAddr, SocketAddr};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use rtc_lite::peer_connection::event::RTCPeerConnectionEvent;
use rtc_lite::peer_connection::transport::{
    Credential, Endpoint, EndpointEventSender, EndpointFactory, StaticInterfaces,
};
use rtc_lite::peer_connection::{RTCPeerConnection, RTCPeerConnectionBuilder};
use rtc_lite::rtp::packet::Packet;
use rtc_lite::shared::error::{Error, Result};

pub const EVENT_TIMEOUT: Duration = Duration::from_secs(5);

/// Records what the peer connection sends and lets a test inject events.
pub struct MockEndpoint {
    addr: SocketAddr,
    pub events: EndpointEventSender,
    pub sent: Mutex<Vec<Packet>>,
    pub closed: AtomicBool,
    close_err: bool,
}

impl MockEndpoint {
    pub fn sent(&self) -> Vec<Packet> {
        self.sent.lock().unwrap().clone()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

impl Endpoint for MockEndpoint {
    fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    fn send(&self, packet: &Packet) -> Result<()> {
        if self.is_closed() {
            return Err(Error::ErrEndpointClosed);
        }
        self.sent.lock().unwrap().push(packet.clone());
        Ok(())
    }

    fn close(&self) -> Result<()> {
        self.closed.store(true, Ordering::SeqCst);
        if self.close_err {
            Err(Error::Other(format!("close {}", self.events.id())))
        } else {
            Ok(())
        }
    }
}

#[derive(Default)]
pub struct MockFactory {
    pub endpoints: Mutex<Vec<Arc<MockEndpoint>>>,
    pub close_err: bool,
}

impl MockFactory {
    pub fn endpoint(&self, i: usize) -> Arc<MockEndpoint> {
        Arc::clone(&self.endpoints.lock().unwrap()[i])
    }

    pub fn len(&self) -> usize {
        self.endpoints.lock().unwrap().len()
    }
}

impl EndpointFactory for MockFactory {
    fn bind(
        &self,
        local_ip: IpAddr,
        _local_password: &str,
        _credential: Arc<dyn Credential>,
        events: EndpointEventSender,
    ) -> Result<Arc<dyn Endpoint>> {
        let endpoint = Arc::new(MockEndpoint {
            addr: SocketAddr::new(local_ip, 40000 + events.id() as u16),
            events,
            sent: Mutex::new(vec![]),
            closed: AtomicBool::new(false),
            close_err: self.close_err,
        });
        self.endpoints.lock().unwrap().push(Arc::clone(&endpoint));
        Ok(endpoint)
    }
}

pub fn host_addresses(n: u8) -> Vec<IpAddr> {
    (1..=n).map(|i| IpAddr::from([192, 168, 1, i])).collect()
}

/// A peer connection binding one mock endpoint per address.
pub fn new_peer_connection(
    factory: &Arc<MockFactory>,
    addresses: Vec<IpAddr>,
) -> Result<RTCPeerConnection> {
    let factory: Arc<dyn EndpointFactory> = Arc::clone(factory) as Arc<dyn EndpointFactory>;
    RTCPeerConnectionBuilder::new()
        .with_endpoint_factory(factory)
        .with_host_interfaces(Arc::new(StaticInterfaces(addresses)))
        .build()
}

pub fn drain_events(pc: &mut RTCPeerConnection) -> Vec<RTCPeerConnectionEvent> {
    let mut events = vec![];
    while let Some(event) = pc.poll_event() {
        events.push(event);
    }
    events
}

/// Waits for the first event matching `f`, returning every event seen on the way.
pub async fn wait_for_event<F>(
    pc: &mut RTCPeerConnection,
    f: F,
) -> anyhow::Result<Vec<RTCPeerConnectionEvent>>
where
    F: Fn(&RTCPeerConnectionEvent) -> bool,
{
    let mut events = vec![];
    loop {
        let event = tokio::time::timeout(EVENT_TIMEOUT, pc.recv_event())
            .await?
            .ok_or_else(|| anyhow::anyhow!("event channel closed"))?;
        let done = f(&event);
        events.push(event);
        if done {
            return Ok(events);
        }
    }
}

pub fn init_log() {
    env_logger::builder().is_test(true).try_init().ok();
}
