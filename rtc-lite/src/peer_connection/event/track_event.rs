use rtp::packet::Packet;
use tokio::sync::mpsc;

use crate::media_stream::track::MediaStreamTrack;

/// Announces a remote track, raised by the first packet of a new SSRC.
///
/// Every packet of the SSRC, the first included, is delivered on `packets`
/// in arrival order. Incoming packets wait while the channel is full, so a
/// slow reader slows down delivery for the whole connection. Dropping the
/// receiver discards the rest of the track.
#[derive(Debug)]
pub struct RTCTrackEvent {
    pub track: MediaStreamTrack,
    pub packets: mpsc::Receiver<Packet>,
}
