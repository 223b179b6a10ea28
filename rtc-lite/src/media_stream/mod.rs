//! Media tracks.
//!
//! A [`MediaStreamTrack`] describes one stream of media: its identifier,
//! label, SSRC and codec. Locally created tracks are wrapped in a
//! [`TrackLocal`] that accepts [`Sample`]s; remote tracks are announced with
//! an [`RTCTrackEvent`](crate::peer_connection::event::RTCTrackEvent).

pub mod track;
pub mod track_local;

pub use track::{MediaStreamTrack, MediaStreamTrackId};
pub use track_local::{Sample, TrackLocal};
