use bytes::Bytes;
use log::{trace, warn};
use rtp::packetizer::Packetizer;
use tokio::sync::mpsc;

use crate::media_stream::track::MediaStreamTrack;
use crate::peer_connection::transport::endpoint::EndpointManager;
use shared::error::{Error, Result};

/// Capacity of the sample channel of an outgoing track.
pub(crate) const SAMPLE_CHANNEL_CAPACITY: usize = 15;

/// Largest RTP packet an outgoing track emits.
pub(crate) const RTP_OUTBOUND_MTU: usize = 1400;

/// A chunk of encoded media handed to an outgoing track.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    /// Encoded media, packetized according to the track's codec.
    pub data: Bytes,

    /// Number of samples `data` spans, in units of the codec clock rate.
    /// Advances the RTP timestamp.
    pub samples: u32,
}

/// TrackLocal is the sending half of a locally created track.
///
/// Samples written here are packetized and sent to every live transport
/// endpoint of the peer connection that created the track. Dropping every
/// clone of the `TrackLocal` stops the track.
#[derive(Debug, Clone)]
pub struct TrackLocal {
    track: MediaStreamTrack,
    samples_tx: mpsc::Sender<Sample>,
}

impl TrackLocal {
    pub(crate) fn new(track: MediaStreamTrack, samples_tx: mpsc::Sender<Sample>) -> Self {
        Self { track, samples_tx }
    }

    pub fn track(&self) -> &MediaStreamTrack {
        &self.track
    }

    /// write_sample queues a sample, waiting while the channel is full.
    ///
    /// Fails with [`Error::ErrClosedPipe`] once the track stopped.
    pub async fn write_sample(&self, sample: Sample) -> Result<()> {
        self.samples_tx
            .send(sample)
            .await
            .map_err(|_| Error::ErrClosedPipe)
    }
}

/// write_samples packetizes every sample received and fans the packets out
/// to the live endpoints, until the sample channel is closed.
pub(crate) async fn write_samples<P: Packetizer>(
    mut packetizer: P,
    mut samples_rx: mpsc::Receiver<Sample>,
    endpoints: EndpointManager,
) {
    while let Some(sample) = samples_rx.recv().await {
        let packets = match packetizer.packetize(&sample.data, sample.samples) {
            Ok(packets) => packets,
            Err(err) => {
                warn!("failed to packetize sample: {err}");
                continue;
            }
        };

        for packet in &packets {
            if let Err(err) = endpoints.send(packet) {
                warn!("failed to send packet: {err}");
            }
        }
    }

    trace!("sample channel closed, track writer exits");
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::rtp_transceiver::rtp_sender::{RTCRtpCodec, RtpCodecKind};

    #[tokio::test]
    async fn test_write_sample_after_stop() -> Result<()> {
        let codec = RTCRtpCodec::new(RtpCodecKind::Audio, "opus", 48000, 2, "", 111);
        let (samples_tx, mut samples_rx) = mpsc::channel(SAMPLE_CHANNEL_CAPACITY);
        let track = TrackLocal::new(
            MediaStreamTrack::new("audio".to_owned(), "stream0".to_owned(), 7, codec),
            samples_tx,
        );

        let sample = Sample {
            data: Bytes::from_static(&[0xde, 0xad]),
            samples: 960,
        };
        track.write_sample(sample.clone()).await?;
        assert_eq!(samples_rx.recv().await, Some(sample.clone()));

        drop(samples_rx);
        assert_eq!(track.write_sample(sample).await, Err(Error::ErrClosedPipe));

        Ok(())
    }
}
