mod common;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use bytes::Bytes;
use tokio::time::{sleep, timeout};

use common::{
    EVENT_TIMEOUT, MockEndpoint, MockFactory, drain_events, host_addresses, init_log,
    new_peer_connection, wait_for_event,
};
use rtc_lite::media_stream::Sample;
use rtc_lite::peer_connection::event::RTCPeerConnectionEvent;
use rtc_lite::peer_connection::sdp::RTCSessionDescription;
use rtc_lite::peer_connection::state::{RTCIceConnectionState, RTCPeerConnectionState};
use rtc_lite::peer_connection::transport::RTCIceTransportState;
use rtc_lite::rtp::header::Header;
use rtc_lite::rtp::packet::Packet;
use rtc_lite::rtp_transceiver::rtp_sender::RtpCodecKind;

const AUDIO_OFFER: &str = "v=0\r\n\
                           o=- 1 2 IN IP4 0.0.0.0\r\n\
                           s=-\r\n\
                           t=0 0\r\n\
                           m=audio 9 UDP/TLS/RTP/SAVPF 109\r\n\
                           c=IN IP4 0.0.0.0\r\n\
                           a=mid:0\r\n\
                           a=sendonly\r\n\
                           a=rtpmap:109 opus/48000/2\r\n\
                           a=fmtp:109 minptime=10;useinbandfec=1\r\n\
                           a=ssrc:4242 cname:mic\r\n\
                           a=ssrc:4242 msid:mic audio-main\r\n";

fn packet(ssrc: u32, payload_type: u8, sequence_number: u16) -> Packet {
    Packet {
        header: Header {
            version: 2,
            payload_type,
            sequence_number,
            ssrc,
            ..Default::default()
        },
        payload: Bytes::from(vec![sequence_number as u8]),
    }
}

async fn wait_until_sent(endpoint: &MockEndpoint, n: usize) -> Result<Vec<Packet>> {
    timeout(EVENT_TIMEOUT, async {
        loop {
            let sent = endpoint.sent();
            if sent.len() >= n {
                return sent;
            }
            sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .map_err(Into::into)
}

#[tokio::test]
async fn test_samples_reach_every_endpoint_in_order() -> Result<()> {
    init_log();

    let factory = Arc::new(MockFactory::default());
    let mut pc = new_peer_connection(&factory, host_addresses(2))?;

    let track = pc.new_track(111, "audio0".to_owned(), "stream0".to_owned())?;
    pc.add_track(track.track().clone())?;
    pc.create_offer(None)?;
    assert_eq!(factory.len(), 2);

    for i in 1..=3u8 {
        track
            .write_sample(Sample {
                data: Bytes::from(vec![i; 4]),
                samples: 960,
            })
            .await?;
    }

    for i in 0..2 {
        let sent = wait_until_sent(&factory.endpoint(i), 3).await?;
        assert_eq!(sent.len(), 3);

        for (n, p) in sent.iter().enumerate() {
            assert_eq!(p.header.ssrc, track.track().ssrc());
            assert_eq!(p.header.payload_type, 111);
            assert_eq!(p.payload, Bytes::from(vec![n as u8 + 1; 4]));
        }
        for pair in sent.windows(2) {
            assert_eq!(
                pair[1].header.sequence_number,
                pair[0].header.sequence_number.wrapping_add(1)
            );
            assert_eq!(
                pair[1].header.timestamp.wrapping_sub(pair[0].header.timestamp),
                960
            );
        }
    }

    // a failed endpoint is dropped from the fan-out
    factory
        .endpoint(0)
        .events
        .set_state(RTCIceTransportState::Failed)?;
    timeout(EVENT_TIMEOUT, async {
        while !factory.endpoint(0).is_closed() {
            sleep(Duration::from_millis(10)).await;
        }
    })
    .await?;

    track
        .write_sample(Sample {
            data: Bytes::from_static(&[4, 4, 4, 4]),
            samples: 960,
        })
        .await?;
    let sent = wait_until_sent(&factory.endpoint(1), 4).await?;
    assert_eq!(sent[3].payload, Bytes::from_static(&[4, 4, 4, 4]));
    assert_eq!(factory.endpoint(0).sent().len(), 3);

    pc.close()?;

    Ok(())
}

#[tokio::test]
async fn test_incoming_packets_are_demultiplexed_by_ssrc() -> Result<()> {
    init_log();

    let factory = Arc::new(MockFactory::default());
    let mut pc = new_peer_connection(&factory, host_addresses(1))?;

    pc.set_remote_description(RTCSessionDescription::offer(AUDIO_OFFER.to_owned())?)?;
    pc.create_answer(None)?;
    drain_events(&mut pc);

    let events = factory.endpoint(0).events.clone();
    // unknown payload type, dropped
    events.send_packet(packet(4242, 99, 0))?;
    for sequence_number in 1..=3 {
        events.send_packet(packet(4242, 109, sequence_number))?;
    }

    let seen = wait_for_event(&mut pc, |e| matches!(e, RTCPeerConnectionEvent::OnTrack(_))).await?;
    let Some(RTCPeerConnectionEvent::OnTrack(mut track_event)) = seen.into_iter().last() else {
        anyhow::bail!("expected a track event");
    };

    assert_eq!(track_event.track.id(), "audio-main");
    assert_eq!(track_event.track.label(), "mic");
    assert_eq!(track_event.track.ssrc(), 4242);
    assert_eq!(track_event.track.kind(), RtpCodecKind::Audio);
    assert_eq!(track_event.track.payload_type(), 109);
    assert_eq!(track_event.track.codec().name, "opus");

    for sequence_number in 1..=3 {
        let p = timeout(EVENT_TIMEOUT, track_event.packets.recv())
            .await?
            .ok_or_else(|| anyhow::anyhow!("packet channel closed"))?;
        assert_eq!(p.header.sequence_number, sequence_number);
    }

    // more packets of the same ssrc do not announce another track
    events.send_packet(packet(4242, 109, 4))?;
    events.send_packet(packet(5000, 109, 1))?;

    let seen = wait_for_event(&mut pc, |e| matches!(e, RTCPeerConnectionEvent::OnTrack(_))).await?;
    let tracks: Vec<_> = seen
        .iter()
        .filter_map(|e| match e {
            RTCPeerConnectionEvent::OnTrack(t) => Some(t),
            _ => None,
        })
        .collect();
    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0].track.ssrc(), 5000);
    assert_eq!(tracks[0].track.label(), "remote audio");

    let p = timeout(EVENT_TIMEOUT, track_event.packets.recv())
        .await?
        .ok_or_else(|| anyhow::anyhow!("packet channel closed"))?;
    assert_eq!(p.header.sequence_number, 4);

    pc.close()?;

    Ok(())
}

#[tokio::test]
async fn test_unread_track_does_not_stall_other_traffic() -> Result<()> {
    init_log();

    let factory = Arc::new(MockFactory::default());
    let mut pc = new_peer_connection(&factory, host_addresses(1))?;

    pc.set_remote_description(RTCSessionDescription::offer(AUDIO_OFFER.to_owned())?)?;
    pc.create_answer(None)?;
    drain_events(&mut pc);

    let endpoint = factory.endpoint(0);
    endpoint.events.set_state(RTCIceTransportState::Connected)?;
    // far more than both channels of the track hold, never read
    for sequence_number in 0..100 {
        endpoint.events.send_packet(packet(4242, 109, sequence_number))?;
    }
    endpoint.events.send_packet(packet(5000, 109, 0))?;

    let seen = wait_for_event(&mut pc, |e| {
        matches!(e, RTCPeerConnectionEvent::OnTrack(t) if t.track.ssrc() == 5000)
    })
    .await?;
    let mut tracks: Vec<_> = seen
        .into_iter()
        .filter_map(|e| match e {
            RTCPeerConnectionEvent::OnTrack(t) => Some(t),
            _ => None,
        })
        .collect();
    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[0].track.ssrc(), 4242);

    let p = timeout(EVENT_TIMEOUT, tracks[1].packets.recv())
        .await?
        .ok_or_else(|| anyhow::anyhow!("packet channel closed"))?;
    assert_eq!(p.header.ssrc, 5000);

    // liveness is still handled
    endpoint.events.set_state(RTCIceTransportState::Failed)?;
    wait_for_event(&mut pc, |e| {
        matches!(
            e,
            RTCPeerConnectionEvent::OnConnectionStateChangeEvent(
                RTCPeerConnectionState::Disconnected
            )
        )
    })
    .await?;
    assert!(endpoint.is_closed());
    assert_eq!(pc.ice_connection_state(), RTCIceConnectionState::Disconnected);

    // the unread track kept the oldest packets, in order
    let mut received = vec![];
    while let Ok(p) = tracks[0].packets.try_recv() {
        received.push(p.header.sequence_number);
    }
    assert_eq!(received.first(), Some(&0));
    assert!(received.len() < 100);
    assert!(received.windows(2).all(|pair| pair[0] < pair[1]));

    pc.close()?;

    Ok(())
}

#[tokio::test]
async fn test_losing_every_endpoint_disconnects_once() -> Result<()> {
    init_log();

    let factory = Arc::new(MockFactory::default());
    let mut pc = new_peer_connection(&factory, host_addresses(2))?;
    pc.create_offer(None)?;
    drain_events(&mut pc);
    assert_eq!(pc.ice_connection_state(), RTCIceConnectionState::New);

    let (first, second) = (factory.endpoint(0), factory.endpoint(1));

    first.events.set_state(RTCIceTransportState::Connected)?;
    wait_for_event(&mut pc, |e| {
        matches!(
            e,
            RTCPeerConnectionEvent::OnConnectionStateChangeEvent(RTCPeerConnectionState::Connected)
        )
    })
    .await?;
    assert_eq!(pc.ice_connection_state(), RTCIceConnectionState::Connected);

    // one endpoint left, still connected
    first.events.set_state(RTCIceTransportState::Failed)?;
    second.events.set_state(RTCIceTransportState::Connected)?;
    second.events.set_state(RTCIceTransportState::Failed)?;

    let seen = wait_for_event(&mut pc, |e| {
        matches!(
            e,
            RTCPeerConnectionEvent::OnConnectionStateChangeEvent(
                RTCPeerConnectionState::Disconnected
            )
        )
    })
    .await?;
    assert_eq!(seen.len(), 2);
    assert!(matches!(
        seen[0],
        RTCPeerConnectionEvent::OnIceConnectionStateChangeEvent(
            RTCIceConnectionState::Disconnected
        )
    ));
    assert!(first.is_closed());
    assert!(second.is_closed());

    // repeated failures change nothing
    second.events.set_state(RTCIceTransportState::Failed)?;
    first.events.set_state(RTCIceTransportState::Closed)?;
    sleep(Duration::from_millis(100)).await;
    assert!(drain_events(&mut pc).is_empty());
    assert_eq!(pc.connection_state(), RTCPeerConnectionState::Disconnected);

    pc.close()?;
    assert_eq!(pc.connection_state(), RTCPeerConnectionState::Closed);

    Ok(())
}
