use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, RwLock};

use log::{debug, trace, warn};
use rtp::packet::Packet;
use sdp::SessionDescription;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

use crate::media_stream::track::MediaStreamTrack;
use crate::peer_connection::configuration::media_engine::MediaEngine;
use crate::peer_connection::event::{RTCPeerConnectionEvent, RTCTrackEvent};
use crate::peer_connection::sdp::get_ssrc_msid;
use crate::peer_connection::state::{RTCIceConnectionState, RTCPeerConnectionState};
use crate::peer_connection::transport::endpoint::{EndpointEvent, EndpointId, EndpointManager};
use crate::peer_connection::transport::ice::RTCIceTransportState;
use crate::rtp_transceiver::rtp_sender::RTCRtpCodec;
use crate::rtp_transceiver::{PayloadType, SSRC};
use shared::error::{Error, Result};
use shared::util::math_rand_alpha;

/// Capacity of the packet channel handed out with every remote track.
pub(crate) const REMOTE_TRACK_CHANNEL_CAPACITY: usize = 15;

/// State shared between a peer connection and its endpoint event router.
pub(crate) struct PeerConnectionInternal {
    pub(crate) endpoints: EndpointManager,
    pub(crate) media_engine: MediaEngine,
    pub(crate) remote_description: RwLock<Option<SessionDescription>>,

    ice_connection_state: AtomicU8,
    peer_connection_state: AtomicU8,

    event_tx: mpsc::UnboundedSender<RTCPeerConnectionEvent>,
}

impl PeerConnectionInternal {
    pub(crate) fn new(
        media_engine: MediaEngine,
        event_tx: mpsc::UnboundedSender<RTCPeerConnectionEvent>,
    ) -> Self {
        Self {
            endpoints: EndpointManager::default(),
            media_engine,
            remote_description: RwLock::new(None),
            ice_connection_state: AtomicU8::new(RTCIceConnectionState::New as u8),
            peer_connection_state: AtomicU8::new(RTCPeerConnectionState::New as u8),
            event_tx,
        }
    }

    pub(crate) fn emit(&self, event: RTCPeerConnectionEvent) {
        if self.event_tx.send(event).is_err() {
            trace!("peer connection event receiver is gone");
        }
    }

    pub(crate) fn ice_connection_state(&self) -> RTCIceConnectionState {
        self.ice_connection_state.load(Ordering::SeqCst).into()
    }

    pub(crate) fn peer_connection_state(&self) -> RTCPeerConnectionState {
        self.peer_connection_state.load(Ordering::SeqCst).into()
    }

    /// set_ice_connection_state moves to `state` and derives the peer
    /// connection state from it. An event is emitted for every state that
    /// actually changed. Nothing leaves `Closed`.
    pub(crate) fn set_ice_connection_state(&self, state: RTCIceConnectionState) {
        let changed = self
            .ice_connection_state
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |cur| {
                let cur = RTCIceConnectionState::from(cur);
                (cur != state && cur != RTCIceConnectionState::Closed).then_some(state as u8)
            })
            .is_ok();
        if !changed {
            return;
        }

        debug!("ICE connection state changed: {state}");
        self.emit(RTCPeerConnectionEvent::OnIceConnectionStateChangeEvent(
            state,
        ));

        let pc_state = RTCPeerConnectionState::from(state);
        let changed = self
            .peer_connection_state
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |cur| {
                let cur = RTCPeerConnectionState::from(cur);
                (cur != pc_state && cur != RTCPeerConnectionState::Closed)
                    .then_some(pc_state as u8)
            })
            .is_ok();
        if changed {
            debug!("peer connection state changed: {pc_state}");
            self.emit(RTCPeerConnectionEvent::OnConnectionStateChangeEvent(
                pc_state,
            ));
        }
    }

    /// handle_endpoint_state applies the liveness report of one endpoint.
    ///
    /// A failed endpoint is removed and closed; once none is left the
    /// connection is disconnected. Any other report except `Closed` means
    /// the connection is alive.
    pub(crate) fn handle_endpoint_state(
        &self,
        id: EndpointId,
        state: RTCIceTransportState,
    ) -> Result<()> {
        match state {
            RTCIceTransportState::Failed => {
                let (removed, empty) = self.endpoints.remove(id)?;
                if let Some(endpoint) = removed {
                    debug!("endpoint {id} failed, removed");
                    if let Err(err) = endpoint.close() {
                        warn!("failed to close endpoint {id}: {err}");
                    }
                }
                if empty {
                    self.set_ice_connection_state(RTCIceConnectionState::Disconnected);
                }
            }
            RTCIceTransportState::Closed => {
                trace!("endpoint {id} closed");
            }
            _ => self.set_ice_connection_state(RTCIceConnectionState::Connected),
        }
        Ok(())
    }

    /// remote_codec resolves the codec of an incoming payload type through the
    /// remote description, keeping the remote payload type.
    fn remote_codec(&self, payload_type: PayloadType) -> Result<RTCRtpCodec> {
        let remote_description = self.remote_description.read()?;
        let remote_description = remote_description
            .as_ref()
            .ok_or(Error::ErrNoRemoteDescription)?;

        let sdp_codec = remote_description.get_codec_for_payload_type(payload_type)?;
        let mut codec = self.media_engine.get_codec_sdp(&sdp_codec)?;
        codec.payload_type = payload_type;
        Ok(codec)
    }

    fn new_remote_track(&self, ssrc: SSRC, payload_type: PayloadType) -> Result<MediaStreamTrack> {
        let codec = self.remote_codec(payload_type)?;

        let msid = {
            let remote_description = self.remote_description.read()?;
            remote_description
                .as_ref()
                .and_then(|d| get_ssrc_msid(d, ssrc))
        };
        let (label, id) =
            msid.unwrap_or_else(|| (format!("remote {}", codec.kind), math_rand_alpha(16)));

        Ok(MediaStreamTrack::new(id, label, ssrc, codec))
    }
}

/// route_endpoint_events handles the events of every endpoint of a peer
/// connection, in arrival order, until all senders are gone.
///
/// The first packet of an SSRC announces a remote track through
/// [`RTCPeerConnectionEvent::OnTrack`] and starts the delivery task of that
/// SSRC; that packet and every later one of the same SSRC are handed to it.
/// The router itself never waits on a track, so a track the application does
/// not read holds up only its own packets. Packets arriving while a track's
/// backlog is full are dropped. Once the application drops a track's
/// receiver, further packets of that SSRC are discarded.
pub(crate) async fn route_endpoint_events(
    internal: Arc<PeerConnectionInternal>,
    mut events_rx: mpsc::UnboundedReceiver<(EndpointId, EndpointEvent)>,
) {
    let mut tracks: HashMap<SSRC, Option<mpsc::Sender<Packet>>> = HashMap::new();

    while let Some((id, event)) = events_rx.recv().await {
        match event {
            EndpointEvent::Packet(packet) => route_packet(&internal, &mut tracks, packet),
            EndpointEvent::StateChange(state) => {
                if let Err(err) = internal.handle_endpoint_state(id, state) {
                    warn!("failed to handle state {state} of endpoint {id}: {err}");
                }
            }
        }
    }

    trace!("all endpoint event senders are gone, router exits");
}

fn route_packet(
    internal: &PeerConnectionInternal,
    tracks: &mut HashMap<SSRC, Option<mpsc::Sender<Packet>>>,
    packet: Packet,
) {
    let ssrc = packet.header.ssrc;
    let entry = match tracks.entry(ssrc) {
        Entry::Occupied(entry) => entry.into_mut(),
        Entry::Vacant(entry) => {
            let track = match internal.new_remote_track(ssrc, packet.header.payload_type) {
                Ok(track) => track,
                Err(err) => {
                    warn!(
                        "dropping packet of ssrc {ssrc} with payload type {}: {err}",
                        packet.header.payload_type
                    );
                    return;
                }
            };

            debug!("new remote track {} with ssrc {ssrc}", track.id());
            let (backlog_tx, backlog_rx) = mpsc::channel(REMOTE_TRACK_CHANNEL_CAPACITY);
            let (packets_tx, packets) = mpsc::channel(REMOTE_TRACK_CHANNEL_CAPACITY);
            tokio::spawn(deliver_remote_packets(ssrc, backlog_rx, packets_tx));
            internal.emit(RTCPeerConnectionEvent::OnTrack(RTCTrackEvent {
                track,
                packets,
            }));
            entry.insert(Some(backlog_tx))
        }
    };

    let Some(backlog_tx) = entry else {
        trace!("discarding packet of released ssrc {ssrc}");
        return;
    };
    match backlog_tx.try_send(packet) {
        Ok(()) => {}
        Err(TrySendError::Full(packet)) => {
            trace!(
                "backlog of ssrc {ssrc} is full, dropping packet {}",
                packet.header.sequence_number
            );
        }
        Err(TrySendError::Closed(_)) => {
            debug!("receiver of ssrc {ssrc} released");
            *entry = None;
        }
    }
}

/// deliver_remote_packets moves the packets of one SSRC to the application,
/// waiting while its channel is full, until either side goes away.
async fn deliver_remote_packets(
    ssrc: SSRC,
    mut backlog_rx: mpsc::Receiver<Packet>,
    packets_tx: mpsc::Sender<Packet>,
) {
    while let Some(packet) = backlog_rx.recv().await {
        if packets_tx.send(packet).await.is_err() {
            break;
        }
    }
    trace!("delivery of ssrc {ssrc} stopped");
}
