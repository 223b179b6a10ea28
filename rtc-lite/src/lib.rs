//! # rtc-lite - peer connection control core
//!
//! A compact implementation of the control plane of a WebRTC peer
//! connection: offer/answer negotiation, transceivers, a codec registry and
//! ICE-lite host candidates. Sockets, connectivity checks and the secure
//! transport handshake are left to pluggable transport endpoints, so the
//! crate can be driven by real sockets or by in-memory mocks alike.
//!
//! ## Overview
//!
//! - **Signaling** - the W3C signaling state machine, pending and current
//!   descriptions, offers and answers rendered in a fixed attribute order
//! - **Transceivers** - `add_track` reuse, direction negotiation, mids
//! - **Transport endpoints** - one [`Endpoint`](peer_connection::transport::Endpoint)
//!   per host interface, bound by an
//!   [`EndpointFactory`](peer_connection::transport::EndpointFactory) when the
//!   first offer or answer is created
//! - **Media** - outgoing samples are packetized with the [`rtp`] crate and
//!   sent to every live endpoint; incoming packets are demultiplexed by SSRC
//!   into remote tracks
//! - **Configuration** - validation of ICE server URLs, TURN credentials,
//!   certificates and frozen policies
//!
//! Everything the connection observes is reported as an
//! [`RTCPeerConnectionEvent`](peer_connection::event::RTCPeerConnectionEvent)
//! read with `poll_event()` or `recv_event().await`.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::net::{IpAddr, SocketAddr};
//! use std::sync::Arc;
//!
//! use rtc_lite::peer_connection::RTCPeerConnectionBuilder;
//! use rtc_lite::peer_connection::configuration::RTCConfigurationBuilder;
//! use rtc_lite::peer_connection::event::RTCPeerConnectionEvent;
//! use rtc_lite::peer_connection::sdp::RTCSessionDescription;
//! use rtc_lite::peer_connection::transport::{
//!     Credential, Endpoint, EndpointEventSender, EndpointFactory, RTCIceServer,
//! };
//! use rtc_lite::media_stream::Sample;
//! use rtc_lite::rtp::packet::Packet;
//! use rtc_lite::shared::error::Result;
//!
//! struct UdpEndpoint;
//!
//! impl Endpoint for UdpEndpoint {
//!     fn local_addr(&self) -> SocketAddr {
//!         SocketAddr::from(([192, 168, 1, 100], 50000))
//!     }
//!     fn send(&self, _packet: &Packet) -> Result<()> {
//!         Ok(())
//!     }
//!     fn close(&self) -> Result<()> {
//!         Ok(())
//!     }
//! }
//!
//! struct UdpFactory;
//!
//! impl EndpointFactory for UdpFactory {
//!     fn bind(
//!         &self,
//!         _local_ip: IpAddr,
//!         _local_password: &str,
//!         _credential: Arc<dyn Credential>,
//!         _events: EndpointEventSender,
//!     ) -> Result<Arc<dyn Endpoint>> {
//!         Ok(Arc::new(UdpEndpoint))
//!     }
//! }
//!
//! # fn receive_from_remote_peer() -> String { String::new() }
//! # #[tokio::main]
//! # async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//! let config = RTCConfigurationBuilder::new()
//!     .with_ice_servers(vec![RTCIceServer {
//!         urls: vec!["stun:stun.l.google.com:19302".to_owned()],
//!         ..Default::default()
//!     }])
//!     .build();
//!
//! let mut pc = RTCPeerConnectionBuilder::new()
//!     .with_configuration(config)
//!     .with_endpoint_factory(Arc::new(UdpFactory))
//!     .build()?;
//!
//! // an opus track
//! let track = pc.new_track(111, "audio".to_owned(), "stream".to_owned())?;
//! pc.add_track(track.track().clone())?;
//!
//! // the offer is applied as local description before it is returned
//! let offer = pc.create_offer(None)?;
//! println!("{}", serde_json::to_string(&offer)?);
//!
//! let answer: RTCSessionDescription = serde_json::from_str(&receive_from_remote_peer())?;
//! pc.set_remote_description(answer)?;
//!
//! track
//!     .write_sample(Sample {
//!         data: bytes::Bytes::from_static(&[0xde, 0xad, 0xbe, 0xef]),
//!         samples: 960,
//!     })
//!     .await?;
//!
//! while let Some(event) = pc.recv_event().await {
//!     match event {
//!         RTCPeerConnectionEvent::OnConnectionStateChangeEvent(state) => {
//!             println!("Connection State: {state}");
//!         }
//!         RTCPeerConnectionEvent::OnTrack(mut track_event) => {
//!             tokio::spawn(async move {
//!                 while let Some(packet) = track_event.packets.recv().await {
//!                     println!("{} bytes on {}", packet.payload.len(), track_event.track.id());
//!                 }
//!             });
//!         }
//!         _ => {}
//!     }
//! }
//!
//! pc.close()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! ### [`peer_connection`]
//!
//! - **[`RTCPeerConnection`](peer_connection::RTCPeerConnection)** - Peer connection interface
//! - **[`certificate`](peer_connection::certificate)** - Peer connection certificate
//! - **[`configuration`](peer_connection::configuration)** - Configuration, validation and the codec registry
//! - **[`event`](peer_connection::event)** - Peer connection events
//! - **[`sdp`](peer_connection::sdp)** - SDP offer/answer types
//! - **[`state`](peer_connection::state)** - Peer connection state types
//! - **[`transport`](peer_connection::transport)** - ICE servers, endpoints and credentials
//!
//! ### [`rtp_transceiver`]
//!
//! - **[`RTCRtpTransceiver`](rtp_transceiver::RTCRtpTransceiver)** - Sender and receiver sharing a mid
//! - **[`RTCRtpSender`](rtp_transceiver::rtp_sender::RTCRtpSender)** - Media sender
//! - **[`RTCRtpReceiver`](rtp_transceiver::rtp_receiver::RTCRtpReceiver)** - Media receiver
//!
//! ### [`media_stream`]
//!
//! - **[`MediaStreamTrack`](media_stream::track::MediaStreamTrack)** - Audio/video track
//! - **[`TrackLocal`](media_stream::TrackLocal)** - Sending half of a local track
//!
//! ## Error Handling
//!
//! Every fallible operation returns [`shared::error::Result`]. Errors are
//! grouped by [`Error::kind`](shared::error::Error::kind) into the W3C
//! exception names (invalid state, invalid modification, syntax, ...).

#![warn(rust_2018_idioms)]

pub use {rtp, sdp, shared};

pub mod media_stream;
pub mod peer_connection;
pub mod rtp_transceiver;
