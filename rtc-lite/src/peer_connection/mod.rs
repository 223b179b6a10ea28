//! The peer connection and everything it is built from.
//!
//! [`RTCPeerConnection`] drives offer/answer negotiation, owns the
//! transceivers, gathers ICE-lite host candidates through an
//! [`EndpointFactory`] and reports what happens as [`RTCPeerConnectionEvent`]s.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use rtc_lite::peer_connection::configuration::RTCConfigurationBuilder;
//! use rtc_lite::peer_connection::transport::StaticInterfaces;
//! use rtc_lite::peer_connection::RTCPeerConnectionBuilder;
//! use rtc_lite::rtp_transceiver::direction::RTCRtpTransceiverDirection;
//! use rtc_lite::rtp_transceiver::rtp_sender::RtpCodecKind;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut pc = RTCPeerConnectionBuilder::new()
//!     .with_configuration(RTCConfigurationBuilder::new().build())
//!     .with_host_interfaces(Arc::new(StaticInterfaces(vec![])))
//!     .build()?;
//!
//! pc.add_transceiver_from_kind(RtpCodecKind::Video, RTCRtpTransceiverDirection::Recvonly)?;
//! assert_eq!(pc.get_transceivers().len(), 1);
//!
//! pc.close()?;
//! # Ok(())
//! # }
//! ```

pub mod certificate;
pub mod configuration;
pub mod event;
mod internal;
pub mod sdp;
pub mod state;
pub mod transport;

use std::collections::HashSet;
use std::sync::Arc;

use log::{debug, trace, warn};
use rtp::packetizer::new_packetizer;
use rtp::sequence::{Sequencer, new_random_sequencer};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::media_stream::track::MediaStreamTrack;
use crate::media_stream::track_local::{
    RTP_OUTBOUND_MTU, SAMPLE_CHANNEL_CAPACITY, TrackLocal, write_samples,
};
use crate::peer_connection::configuration::media_engine::MediaEngine;
use crate::peer_connection::configuration::{
    RTCAnswerOptions, RTCConfiguration, RTCOfferOptions, validate_configuration,
};
use crate::peer_connection::event::RTCPeerConnectionEvent;
use crate::peer_connection::internal::{PeerConnectionInternal, route_endpoint_events};
use crate::peer_connection::sdp::{
    MediaSection, PopulateSdpParams, RTCSdpType, RTCSessionDescription,
    codecs_from_media_description, get_media_kind, get_mid_value, get_peer_direction,
    populate_sdp,
};
use crate::peer_connection::state::signaling_state::{StateChangeOp, next_signaling_state};
use crate::peer_connection::state::{
    RTCIceConnectionState, RTCIceGatheringState, RTCPeerConnectionState, RTCSignalingState,
};
use crate::peer_connection::transport::dtls::{
    CertificateProvider, Credential, RTCDtlsFingerprint, SecureTransportProvider,
};
use crate::peer_connection::transport::endpoint::{EndpointEvent, EndpointFactory, EndpointId};
use crate::peer_connection::transport::ice::candidate::host_candidates;
use crate::peer_connection::transport::ice::{ICE_PWD_LEN, ICE_UFRAG_LEN, RTCIceCandidate};
use crate::peer_connection::transport::ifaces::{HostInterfaces, SystemInterfaces};
use crate::rtp_transceiver::direction::RTCRtpTransceiverDirection;
use crate::rtp_transceiver::rtp_receiver::RTCRtpReceiver;
use crate::rtp_transceiver::rtp_sender::{RTCRtpSender, RtpCodecKind};
use crate::rtp_transceiver::{
    PayloadType, RTCRtpSenderId, RTCRtpTransceiver, RTCRtpTransceiverId, SSRC, find_by_mid,
    find_unmatched,
};
use shared::error::{Error, Result};
use shared::util::math_rand_alpha;

/// Builds an [`RTCPeerConnection`] with its collaborators.
///
/// Without further configuration the connection uses the default
/// [`RTCConfiguration`], the default codecs, the system's host interfaces and
/// a freshly generated certificate. An [`EndpointFactory`] must be given
/// before offers or answers can be created.
#[derive(Default)]
pub struct RTCPeerConnectionBuilder {
    configuration: RTCConfiguration,
    media_engine: Option<MediaEngine>,
    endpoint_factory: Option<Arc<dyn EndpointFactory>>,
    host_interfaces: Option<Arc<dyn HostInterfaces>>,
    secure_transport_provider: Option<Arc<dyn SecureTransportProvider>>,
}

impl RTCPeerConnectionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_configuration(mut self, configuration: RTCConfiguration) -> Self {
        self.configuration = configuration;
        self
    }

    /// Replaces the default codecs.
    pub fn with_media_engine(mut self, media_engine: MediaEngine) -> Self {
        self.media_engine = Some(media_engine);
        self
    }

    pub fn with_endpoint_factory(mut self, endpoint_factory: Arc<dyn EndpointFactory>) -> Self {
        self.endpoint_factory = Some(endpoint_factory);
        self
    }

    pub fn with_host_interfaces(mut self, host_interfaces: Arc<dyn HostInterfaces>) -> Self {
        self.host_interfaces = Some(host_interfaces);
        self
    }

    /// Used only when the configuration carries no certificate.
    pub fn with_secure_transport_provider(
        mut self,
        secure_transport_provider: Arc<dyn SecureTransportProvider>,
    ) -> Self {
        self.secure_transport_provider = Some(secure_transport_provider);
        self
    }

    pub fn build(self) -> Result<RTCPeerConnection> {
        validate_configuration(&RTCConfiguration::default(), &self.configuration, false)?;

        let media_engine = self.media_engine.unwrap_or_else(|| {
            let mut media_engine = MediaEngine::default();
            media_engine.register_default_codecs();
            media_engine
        });

        let credential: Arc<dyn Credential> =
            if let Some(certificate) = self.configuration.certificates().first() {
                Arc::new(certificate.clone())
            } else if let Some(provider) = &self.secure_transport_provider {
                provider.new_credential()?
            } else {
                CertificateProvider.new_credential()?
            };

        let fingerprint = RTCDtlsFingerprint {
            algorithm: credential.algorithm().to_owned(),
            value: credential.fingerprint(),
        };

        let host_interfaces: Arc<dyn HostInterfaces> = match self.host_interfaces {
            Some(host_interfaces) => host_interfaces,
            None => Arc::new(SystemInterfaces),
        };

        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (endpoint_events_tx, endpoint_events_rx) = mpsc::unbounded_channel();

        Ok(RTCPeerConnection {
            configuration: self.configuration,

            current_local_description: None,
            pending_local_description: None,
            current_remote_description: None,
            pending_remote_description: None,

            signaling_state: RTCSignalingState::Stable,
            ice_gathering_state: RTCIceGatheringState::New,
            is_closed: false,
            has_local_description: false,

            rtp_transceivers: vec![],
            greater_mid: 0,
            local_ssrcs: HashSet::new(),

            ice_ufrag: math_rand_alpha(ICE_UFRAG_LEN),
            ice_pwd: math_rand_alpha(ICE_PWD_LEN),
            credential,
            fingerprint,
            local_candidates: vec![],

            endpoint_factory: self.endpoint_factory,
            host_interfaces,
            endpoint_events_tx,
            endpoint_events_rx: Some(endpoint_events_rx),
            router: None,

            internal: Arc::new(PeerConnectionInternal::new(media_engine, event_tx)),
            event_rx,
        })
    }
}

/// PeerConnection represents a WebRTC connection that establishes a
/// peer-to-peer communications with another PeerConnection instance in a
/// browser, or to another endpoint implementing the required protocols.
///
/// Every method is synchronous except [`recv_event`](Self::recv_event).
/// Creating an offer or answer, creating a track and gathering need a tokio
/// runtime to be current, since the connection runs one task routing
/// endpoint events, one task per outgoing track and one per incoming SSRC.
pub struct RTCPeerConnection {
    configuration: RTCConfiguration,

    current_local_description: Option<RTCSessionDescription>,
    pending_local_description: Option<RTCSessionDescription>,
    current_remote_description: Option<RTCSessionDescription>,
    pending_remote_description: Option<RTCSessionDescription>,

    signaling_state: RTCSignalingState,
    ice_gathering_state: RTCIceGatheringState,
    is_closed: bool,
    has_local_description: bool,

    rtp_transceivers: Vec<RTCRtpTransceiver>,
    greater_mid: usize,
    local_ssrcs: HashSet<SSRC>,

    ice_ufrag: String,
    ice_pwd: String,
    credential: Arc<dyn Credential>,
    fingerprint: RTCDtlsFingerprint,
    local_candidates: Vec<RTCIceCandidate>,

    endpoint_factory: Option<Arc<dyn EndpointFactory>>,
    host_interfaces: Arc<dyn HostInterfaces>,
    endpoint_events_tx: mpsc::UnboundedSender<(EndpointId, EndpointEvent)>,
    endpoint_events_rx: Option<mpsc::UnboundedReceiver<(EndpointId, EndpointEvent)>>,
    router: Option<JoinHandle<()>>,

    internal: Arc<PeerConnectionInternal>,
    event_rx: mpsc::UnboundedReceiver<RTCPeerConnectionEvent>,
}

impl RTCPeerConnection {
    /// creates a PeerConnection with RTCConfiguration and the default codecs.
    ///
    /// No endpoint factory is set; use [`RTCPeerConnectionBuilder`] to create a
    /// connection that can gather candidates.
    pub fn new(configuration: RTCConfiguration) -> Result<Self> {
        RTCPeerConnectionBuilder::new()
            .with_configuration(configuration)
            .build()
    }

    /// get_configuration returns a PeerConnection's current configuration.
    pub fn get_configuration(&self) -> &RTCConfiguration {
        &self.configuration
    }

    /// set_configuration updates the configuration of this PeerConnection object.
    ///
    /// The configuration is replaced only if every check passes.
    pub fn set_configuration(&mut self, configuration: RTCConfiguration) -> Result<()> {
        if self.is_closed {
            return Err(Error::ErrConnectionClosed);
        }

        validate_configuration(
            &self.configuration,
            &configuration,
            self.has_local_description,
        )?;
        self.configuration = configuration;
        Ok(())
    }

    /// poll_event returns the next queued event without waiting.
    pub fn poll_event(&mut self) -> Option<RTCPeerConnectionEvent> {
        self.event_rx.try_recv().ok()
    }

    /// recv_event waits for the next event.
    pub async fn recv_event(&mut self) -> Option<RTCPeerConnectionEvent> {
        self.event_rx.recv().await
    }

    /// new_track creates an outgoing track sending with the registered codec
    /// of `payload_type`.
    ///
    /// The track gets a random SSRC not used by any other track of this
    /// connection. Samples written to it are packetized and sent to every live
    /// endpoint by a task running until the returned [`TrackLocal`] and all
    /// its clones are dropped.
    pub fn new_track(
        &mut self,
        payload_type: PayloadType,
        id: String,
        label: String,
    ) -> Result<TrackLocal> {
        if self.is_closed {
            return Err(Error::ErrConnectionClosed);
        }

        let codec = self.internal.media_engine.get_codec(payload_type)?;
        let payloader = codec.capability.payloader()?;
        let handle = Handle::try_current().map_err(|_| Error::ErrNoAsyncRuntime)?;

        let ssrc = loop {
            let ssrc = rand::random::<SSRC>();
            if self.local_ssrcs.insert(ssrc) {
                break ssrc;
            }
        };

        let sequencer: Box<dyn Sequencer + Send + Sync> = Box::new(new_random_sequencer());
        let packetizer = new_packetizer(
            RTP_OUTBOUND_MTU,
            codec.payload_type,
            ssrc,
            payloader,
            sequencer,
            codec.capability.clock_rate,
        );

        let (samples_tx, samples_rx) = mpsc::channel(SAMPLE_CHANNEL_CAPACITY);
        handle.spawn(write_samples(
            packetizer,
            samples_rx,
            self.internal.endpoints.clone(),
        ));

        debug!("created track {id} with ssrc {ssrc}");
        Ok(TrackLocal::new(
            MediaStreamTrack::new(id, label, ssrc, codec),
            samples_tx,
        ))
    }

    /// add_track adds a Track to the PeerConnection
    ///
    /// A transceiver that received media of the same kind, never sent and has
    /// no outgoing track is reused; otherwise a sendonly transceiver is
    /// created.
    pub fn add_track(&mut self, track: MediaStreamTrack) -> Result<RTCRtpSenderId> {
        if self.is_closed {
            return Err(Error::ErrConnectionClosed);
        }
        if track.kind() == RtpCodecKind::Unspecified {
            return Err(Error::ErrUnspecifiedMediaKind);
        }

        if self
            .rtp_transceivers
            .iter()
            .any(|t| t.sender().track().is_some_and(|s| s.id() == track.id()))
        {
            return Err(Error::ErrExistingTrack);
        }

        if let Some(t) = self
            .rtp_transceivers
            .iter_mut()
            .find(|t| t.is_reusable_for(track.kind()))
        {
            t.set_sending_track(track)?;
            return Ok(t.sender().id());
        }

        let mut t = RTCRtpTransceiver::new(
            self.rtp_transceivers.len(),
            track.kind(),
            RTCRtpTransceiverDirection::Inactive,
            None,
        );
        t.set_sending_track(track)?;
        let sender_id = t.sender().id();
        self.rtp_transceivers.push(t);

        Ok(sender_id)
    }

    /// add_transceiver_from_kind creates a transceiver with a receiver track of
    /// `kind` and no outgoing track.
    pub fn add_transceiver_from_kind(
        &mut self,
        kind: RtpCodecKind,
        direction: RTCRtpTransceiverDirection,
    ) -> Result<RTCRtpTransceiverId> {
        if self.is_closed {
            return Err(Error::ErrConnectionClosed);
        }
        if kind == RtpCodecKind::Unspecified
            || direction == RTCRtpTransceiverDirection::Unspecified
        {
            return Err(Error::ErrUnspecifiedMediaKind);
        }

        let id = self.rtp_transceivers.len();
        self.rtp_transceivers.push(RTCRtpTransceiver::new(
            id,
            kind,
            direction,
            Some(MediaStreamTrack::new_remote(kind)),
        ));
        Ok(id)
    }

    /// get_senders returns the RTPSenders that are currently attached to this PeerConnection
    pub fn get_senders(&self) -> Vec<RTCRtpSender> {
        self.rtp_transceivers
            .iter()
            .map(|t| t.sender().clone())
            .collect()
    }

    /// get_receivers returns the RTPReceivers that are currently attached to this PeerConnection
    pub fn get_receivers(&self) -> Vec<RTCRtpReceiver> {
        self.rtp_transceivers
            .iter()
            .map(|t| t.receiver().clone())
            .collect()
    }

    /// get_transceivers returns the RtpTransceiver that are currently attached to this PeerConnection
    pub fn get_transceivers(&self) -> Vec<RTCRtpTransceiver> {
        self.rtp_transceivers.clone()
    }

    /// create_offer starts the PeerConnection and generates the localDescription
    /// <https://w3c.github.io/webrtc-pc/#dom-rtcpeerconnection-createoffer>
    ///
    /// Every transceiver that is not stopped gets a media section, receive-only
    /// ones included. The offer is applied as the local description before it
    /// is returned. Nothing is gathered or assigned when the signaling state
    /// does not accept a local offer.
    pub fn create_offer(&mut self, options: Option<RTCOfferOptions>) -> Result<RTCSessionDescription> {
        if self.is_closed {
            return Err(Error::ErrConnectionClosed);
        }
        if options.is_some_and(|o| o.ice_restart) {
            return Err(Error::ErrIceRestartNotSupported);
        }
        next_signaling_state(self.signaling_state, StateChangeOp::SetLocal, RTCSdpType::Offer)?;

        self.gather_candidates()?;

        let mut media_sections = vec![];
        for t in self.rtp_transceivers.iter_mut().filter(|t| !t.stopped()) {
            if t.mid().is_none() {
                t.set_mid(self.greater_mid.to_string());
                self.greater_mid += 1;
            }

            media_sections.push(MediaSection {
                mid: t.mid().unwrap_or_default().to_owned(),
                kind: t.kind(),
                direction: t.direction(),
                codecs: self.internal.media_engine.get_codecs_by_kind(t.kind()),
                track: t.sender().track().cloned(),
            });
        }

        let d = populate_sdp(&media_sections, &self.populate_sdp_params());
        let offer = RTCSessionDescription::from_parsed(RTCSdpType::Offer, d);
        self.set_local_description(offer.clone())?;

        Ok(offer)
    }

    /// create_answer starts the PeerConnection and generates the localDescription
    ///
    /// Media sections follow the order and mids of the remote offer. Codecs are
    /// the local codecs the remote offered, under the remote payload types.
    /// The answer is applied as the local description before it is returned;
    /// the signaling state is checked before any candidate is gathered.
    pub fn create_answer(
        &mut self,
        options: Option<RTCAnswerOptions>,
    ) -> Result<RTCSessionDescription> {
        if self.is_closed {
            return Err(Error::ErrConnectionClosed);
        }

        let remote_description = self
            .remote_description()
            .and_then(|d| d.parsed.clone())
            .ok_or(Error::ErrNoRemoteDescription)?;
        if !matches!(
            self.signaling_state,
            RTCSignalingState::HaveRemoteOffer
                | RTCSignalingState::HaveLocalPranswer
                | RTCSignalingState::HaveRemotePranswer
        ) {
            return Err(Error::ErrIncorrectSignalingState);
        }

        let sdp_type = if options.is_some_and(|o| o.provisional) {
            RTCSdpType::Pranswer
        } else {
            RTCSdpType::Answer
        };
        next_signaling_state(self.signaling_state, StateChangeOp::SetLocal, sdp_type)?;

        self.gather_candidates()?;

        let mut media_sections = vec![];
        for (i, media) in remote_description.media_descriptions.iter().enumerate() {
            let kind = get_media_kind(media);
            if kind == RtpCodecKind::Unspecified {
                debug!("skipping {} media section", media.media_name.media);
                continue;
            }
            let mid = get_mid_value(media).map_or_else(|| i.to_string(), str::to_owned);
            let Some(t) = find_by_mid(&mid, &self.rtp_transceivers).map(|i| &self.rtp_transceivers[i])
            else {
                warn!("no transceiver bound to mid {mid}");
                continue;
            };

            let mut direction = t.direction().intersect(get_peer_direction(media).reverse());
            let mut codecs = codecs_from_media_description(media, &self.internal.media_engine);
            if codecs.is_empty() {
                debug!("no common codec for mid {mid}");
                codecs = self.internal.media_engine.get_codecs_by_kind(kind);
                direction = RTCRtpTransceiverDirection::Inactive;
            }

            media_sections.push(MediaSection {
                mid,
                kind,
                direction,
                codecs,
                track: if direction.has_send() {
                    t.sender().track().cloned()
                } else {
                    None
                },
            });
        }

        let d = populate_sdp(&media_sections, &self.populate_sdp_params());
        let answer = RTCSessionDescription::from_parsed(sdp_type, d);
        self.set_local_description(answer.clone())?;

        Ok(answer)
    }

    /// set_local_description sets the SessionDescription of the local peer
    pub fn set_local_description(&mut self, mut desc: RTCSessionDescription) -> Result<()> {
        if self.is_closed {
            return Err(Error::ErrConnectionClosed);
        }

        if desc.parsed.is_none() {
            desc.parsed = Some(desc.unmarshal()?);
        }
        self.set_description(desc.clone(), StateChangeOp::SetLocal)?;
        self.has_local_description = true;

        if let Some(parsed) = &desc.parsed {
            for media in &parsed.media_descriptions {
                let Some(i) = get_mid_value(media).and_then(|mid| find_by_mid(mid, &self.rtp_transceivers))
                else {
                    continue;
                };
                let t = &mut self.rtp_transceivers[i];
                t.mark_sent();
                if desc.sdp_type.is_answer() {
                    t.set_current_direction(get_peer_direction(media));
                }
            }
        }

        Ok(())
    }

    /// set_remote_description sets the SessionDescription of the remote peer
    ///
    /// Every media section of a remote offer is bound to a transceiver: the
    /// one already carrying its mid, else the first unbound one of the same
    /// kind, else a new recvonly transceiver.
    pub fn set_remote_description(&mut self, mut desc: RTCSessionDescription) -> Result<()> {
        if self.is_closed {
            return Err(Error::ErrConnectionClosed);
        }
        if self.pending_remote_description.is_some() {
            return Err(Error::ErrRemoteDescriptionPending);
        }

        if desc.parsed.is_none() {
            desc.parsed = Some(desc.unmarshal()?);
        }
        self.set_description(desc.clone(), StateChangeOp::SetRemote)?;

        let Some(parsed) = &desc.parsed else {
            return Ok(());
        };
        for (i, media) in parsed.media_descriptions.iter().enumerate() {
            let kind = get_media_kind(media);
            if kind == RtpCodecKind::Unspecified {
                continue;
            }
            let mid = get_mid_value(media).map_or_else(|| i.to_string(), str::to_owned);
            if let Ok(numeric_mid) = mid.parse::<usize>() {
                self.greater_mid = self.greater_mid.max(numeric_mid + 1);
            }

            if desc.sdp_type == RTCSdpType::Offer
                && find_by_mid(&mid, &self.rtp_transceivers).is_none()
            {
                if let Some(t) = find_unmatched(kind, &self.rtp_transceivers) {
                    self.rtp_transceivers[t].set_mid(mid.clone());
                } else {
                    let id = self.rtp_transceivers.len();
                    let mut t = RTCRtpTransceiver::new(
                        id,
                        kind,
                        RTCRtpTransceiverDirection::Recvonly,
                        Some(MediaStreamTrack::new_remote(kind)),
                    );
                    t.set_mid(mid.clone());
                    trace!("created transceiver {id} for remote mid {mid}");
                    self.rtp_transceivers.push(t);
                }
            }

            let Some(t) = find_by_mid(&mid, &self.rtp_transceivers) else {
                continue;
            };
            let t = &mut self.rtp_transceivers[t];
            if desc.sdp_type.is_answer() {
                let direction = t.direction().intersect(get_peer_direction(media).reverse());
                t.set_current_direction(direction);
            }
            let current_direction = t.current_direction();
            t.set_fired_direction(current_direction);
        }

        Ok(())
    }

    /// add_ice_candidate accepts a candidate from the remote peer.
    ///
    /// An ICE-lite endpoint only answers connectivity checks, so remote
    /// candidates are not supported.
    pub fn add_ice_candidate(&mut self, _candidate: &str) -> Result<()> {
        if self.is_closed {
            return Err(Error::ErrConnectionClosed);
        }
        Err(Error::ErrRemoteCandidatesNotSupported)
    }

    /// set_identity_provider is not implemented.
    pub fn set_identity_provider(&mut self, _provider: &str) -> Result<()> {
        Err(Error::ErrIdentityProviderNotImplemented)
    }

    /// local_description returns pending_local_description if it is not null and
    /// otherwise it returns current_local_description.
    pub fn local_description(&self) -> Option<&RTCSessionDescription> {
        self.pending_local_description
            .as_ref()
            .or(self.current_local_description.as_ref())
    }

    /// remote_description returns pending_remote_description if it is not null and
    /// otherwise it returns current_remote_description.
    pub fn remote_description(&self) -> Option<&RTCSessionDescription> {
        self.pending_remote_description
            .as_ref()
            .or(self.current_remote_description.as_ref())
    }

    /// current_local_description represents the local description that was
    /// successfully negotiated the last time the PeerConnection transitioned
    /// into the stable state.
    pub fn current_local_description(&self) -> Option<&RTCSessionDescription> {
        self.current_local_description.as_ref()
    }

    /// pending_local_description represents a local description that is in the
    /// process of being negotiated.
    pub fn pending_local_description(&self) -> Option<&RTCSessionDescription> {
        self.pending_local_description.as_ref()
    }

    pub fn current_remote_description(&self) -> Option<&RTCSessionDescription> {
        self.current_remote_description.as_ref()
    }

    pub fn pending_remote_description(&self) -> Option<&RTCSessionDescription> {
        self.pending_remote_description.as_ref()
    }

    /// signaling_state attribute returns the signaling state of the
    /// PeerConnection instance.
    pub fn signaling_state(&self) -> RTCSignalingState {
        self.signaling_state
    }

    /// ice_gathering_state attribute returns the ICE gathering state of the
    /// PeerConnection instance.
    pub fn ice_gathering_state(&self) -> RTCIceGatheringState {
        self.ice_gathering_state
    }

    /// ice_connection_state returns the aggregate liveness of the endpoints.
    pub fn ice_connection_state(&self) -> RTCIceConnectionState {
        self.internal.ice_connection_state()
    }

    /// connection_state attribute returns the connection state of the
    /// PeerConnection instance.
    pub fn connection_state(&self) -> RTCPeerConnectionState {
        self.internal.peer_connection_state()
    }

    /// local_candidates returns the host candidates gathered so far.
    pub fn local_candidates(&self) -> &[RTCIceCandidate] {
        &self.local_candidates
    }

    /// close ends the PeerConnection
    ///
    /// Every endpoint is closed even if closing one fails; the first error is
    /// returned. Calling close again does nothing.
    pub fn close(&mut self) -> Result<()> {
        // https://www.w3.org/TR/webrtc/#dom-rtcpeerconnection-close (step #1)
        if self.is_closed {
            return Ok(());
        }
        // https://www.w3.org/TR/webrtc/#dom-rtcpeerconnection-close (step #3)
        self.is_closed = true;

        // https://www.w3.org/TR/webrtc/#dom-rtcpeerconnection-close (step #4)
        self.do_signaling_state_change(RTCSignalingState::Closed);

        // https://www.w3.org/TR/webrtc/#dom-rtcpeerconnection-close (step #5)
        for t in &mut self.rtp_transceivers {
            t.stop();
        }

        let result = self.internal.endpoints.close_all();
        if let Some(router) = self.router.take() {
            router.abort();
        }

        self.internal
            .set_ice_connection_state(RTCIceConnectionState::Closed);

        result
    }

    fn populate_sdp_params(&self) -> PopulateSdpParams<'_> {
        PopulateSdpParams {
            identity: !self.configuration.peer_identity().is_empty(),
            ice_ufrag: &self.ice_ufrag,
            ice_pwd: &self.ice_pwd,
            fingerprint: &self.fingerprint,
            candidates: &self.local_candidates,
        }
    }

    /// gather_candidates binds one endpoint per host interface, the first
    /// time it is called. Gathering is synchronous, so the gathering state
    /// events are raised once every endpoint is bound.
    fn gather_candidates(&mut self) -> Result<()> {
        if self.ice_gathering_state != RTCIceGatheringState::New {
            return Ok(());
        }

        let factory = self
            .endpoint_factory
            .clone()
            .ok_or(Error::ErrNoEndpointFactory)?;
        let handle = Handle::try_current().map_err(|_| Error::ErrNoAsyncRuntime)?;
        let host_addresses = self.host_interfaces.host_addresses()?;

        let local_addrs = self.internal.endpoints.gather(
            factory.as_ref(),
            &host_addresses,
            &self.ice_pwd,
            &self.credential,
            &self.endpoint_events_tx,
        )?;

        if let Some(endpoint_events_rx) = self.endpoint_events_rx.take() {
            self.router = Some(handle.spawn(route_endpoint_events(
                Arc::clone(&self.internal),
                endpoint_events_rx,
            )));
        }

        self.set_ice_gathering_state(RTCIceGatheringState::Gathering);
        self.local_candidates = host_candidates(local_addrs, rand::random::<u16>());
        self.set_ice_gathering_state(RTCIceGatheringState::Complete);

        Ok(())
    }

    fn set_ice_gathering_state(&mut self, state: RTCIceGatheringState) {
        if self.ice_gathering_state == state {
            return;
        }
        debug!("ICE gathering state changed: {state}");
        self.ice_gathering_state = state;
        self.internal
            .emit(RTCPeerConnectionEvent::OnIceGatheringStateChangeEvent(state));
    }

    fn do_signaling_state_change(&mut self, state: RTCSignalingState) {
        if self.signaling_state == state {
            return;
        }
        debug!("signaling state changed to {state}");
        self.signaling_state = state;
        self.internal
            .emit(RTCPeerConnectionEvent::OnSignalingStateChangeEvent(state));
    }

    /// set_description runs the signaling state machine and stores `desc` as
    /// pending or current description. An invalid transition changes nothing.
    fn set_description(&mut self, desc: RTCSessionDescription, op: StateChangeOp) -> Result<()> {
        let next_state = next_signaling_state(self.signaling_state, op, desc.sdp_type)?;

        match (op, desc.sdp_type) {
            (StateChangeOp::SetLocal, RTCSdpType::Answer) => {
                self.current_local_description = Some(desc);
                self.pending_local_description = None;
                if let Some(remote) = self.pending_remote_description.take() {
                    self.current_remote_description = Some(remote);
                }
            }
            (StateChangeOp::SetLocal, _) => {
                self.pending_local_description = Some(desc);
            }
            (StateChangeOp::SetRemote, RTCSdpType::Answer) => {
                self.current_remote_description = Some(desc);
                self.pending_remote_description = None;
                if let Some(local) = self.pending_local_description.take() {
                    self.current_local_description = Some(local);
                }
            }
            (StateChangeOp::SetRemote, _) => {
                self.pending_remote_description = Some(desc);
            }
        }

        let remote = self.remote_description().and_then(|d| d.parsed.clone());
        *self.internal.remote_description.write()? = remote;

        self.do_signaling_state_change(next_state);
        Ok(())
    }
}

impl Drop for RTCPeerConnection {
    fn drop(&mut self) {
        if let Err(err) = self.close() {
            warn!("failed to close peer connection: {err}");
        }
    }
}
