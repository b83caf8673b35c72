//! Playback-related small types and errors.

use std::path::PathBuf;

use thiserror::Error;

/// The playback state of the transport.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Playing,
    Paused,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::Stopped
    }
}

/// Failure to load or start a single track on the sink.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {name}: {source}")]
    Decode {
        name: String,
        #[source]
        source: rodio::decoder::DecoderError,
    },
    #[error("failed to fetch stream: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("no audio output device: {0}")]
    Device(#[source] rodio::StreamError),
    #[error("no track loaded")]
    NothingLoaded,
}

/// A track the controller skipped over while hunting for something
/// playable.
#[derive(Debug)]
pub struct Skipped {
    pub index: usize,
    pub error: SinkError,
}

/// Outcome of a successful play/next/previous intent.
#[derive(Debug, Default)]
pub struct PlayReport {
    /// Index that ended up playing, `None` when the playlist was empty.
    pub started: Option<usize>,
    /// Tracks skipped by the auto-advance on the way there.
    pub skipped: Vec<Skipped>,
}

#[derive(Debug, Error)]
pub enum PlayerError {
    /// The bounded auto-skip walked the whole playlist without finding a
    /// playable track.
    #[error("no playable track in the playlist ({attempts} tried)")]
    AllTracksUnplayable {
        attempts: usize,
        skipped: Vec<Skipped>,
    },
}
