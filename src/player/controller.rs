//! The transport state machine.
//!
//! `Player` translates user intents (play, pause, stop, skip, volume)
//! into sink calls and tracks the resume position. It does not own the
//! playlist; intents that need track data borrow it per call.

use std::time::Duration;

use crate::playlist::Playlist;

use super::sink::AudioSink;
use super::types::{PlayReport, PlaybackState, PlayerError, Skipped};

pub struct Player<S> {
    sink: S,
    state: PlaybackState,
    current: usize,
    paused_position: Duration,
    volume_percent: u8,
}

impl<S: AudioSink> Player<S> {
    pub fn new(sink: S, default_volume_percent: u8) -> Self {
        let mut player = Self {
            sink,
            state: PlaybackState::default(),
            current: 0,
            paused_position: Duration::ZERO,
            volume_percent: 0,
        };
        player.set_volume(default_volume_percent);
        player
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Index of the track the transport is positioned on.
    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn volume_percent(&self) -> u8 {
        self.volume_percent
    }

    /// Playback position for display: the sink's position while playing,
    /// the captured resume position while paused.
    pub fn position(&self) -> Duration {
        match self.state {
            PlaybackState::Paused => self.paused_position,
            _ => self.sink.position(),
        }
    }

    #[cfg(test)]
    pub(crate) fn sink(&self) -> &S {
        &self.sink
    }

    #[cfg(test)]
    pub(crate) fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// The play intent.
    ///
    /// Paused playback resumes in place. Otherwise the current track is
    /// loaded and started at the carried-over resume position; when the
    /// sink rejects a track the transport advances with wraparound and
    /// tries the next one, at most once per playlist entry. If nothing
    /// is playable the transport stops and reports a terminal error.
    pub fn play(&mut self, playlist: &Playlist) -> Result<PlayReport, PlayerError> {
        if playlist.is_empty() {
            return Ok(PlayReport::default());
        }

        if self.state == PlaybackState::Paused {
            self.sink.unpause();
            self.state = PlaybackState::Playing;
            return Ok(PlayReport {
                started: Some(self.current),
                skipped: Vec::new(),
            });
        }

        let mut skipped = Vec::new();
        for _ in 0..playlist.len() {
            let Some(track) = playlist.track_at(self.current) else {
                break;
            };

            let attempt = self
                .sink
                .load(track)
                .and_then(|()| self.sink.play(self.paused_position));

            match attempt {
                Ok(()) => {
                    self.state = PlaybackState::Playing;
                    return Ok(PlayReport {
                        started: Some(self.current),
                        skipped,
                    });
                }
                Err(error) => {
                    skipped.push(Skipped {
                        index: self.current,
                        error,
                    });
                    self.current = (self.current + 1) % playlist.len();
                    self.paused_position = Duration::ZERO;
                }
            }
        }

        self.sink.stop();
        self.state = PlaybackState::Stopped;
        Err(PlayerError::AllTracksUnplayable {
            attempts: playlist.len(),
            skipped,
        })
    }

    /// The pause intent: a no-op unless the sink is actively busy.
    pub fn pause(&mut self) {
        if !self.sink.is_busy() {
            return;
        }
        self.sink.pause();
        self.paused_position = self.sink.position();
        self.state = PlaybackState::Paused;
    }

    /// The stop intent: unconditional; clears the resume position.
    pub fn stop(&mut self) {
        self.sink.stop();
        self.state = PlaybackState::Stopped;
        self.paused_position = Duration::ZERO;
    }

    /// Advance to the next track (wrapping) and play it from the start.
    pub fn next(&mut self, playlist: &Playlist) -> Result<PlayReport, PlayerError> {
        self.skip_to(playlist, |current, len| (current + 1) % len)
    }

    /// Step back to the previous track (wrapping) and play it from the start.
    pub fn previous(&mut self, playlist: &Playlist) -> Result<PlayReport, PlayerError> {
        self.skip_to(playlist, |current, len| (current + len - 1) % len)
    }

    fn skip_to(
        &mut self,
        playlist: &Playlist,
        step: impl Fn(usize, usize) -> usize,
    ) -> Result<PlayReport, PlayerError> {
        if playlist.is_empty() {
            return Ok(PlayReport::default());
        }
        self.current = step(self.current, playlist.len());
        self.paused_position = Duration::ZERO;
        // Drop any paused assumption so play() loads rather than unpauses.
        self.state = PlaybackState::Stopped;
        self.play(playlist)
    }

    /// The combined play/pause control bound to spacebar.
    pub fn toggle(&mut self, playlist: &Playlist) -> Result<PlayReport, PlayerError> {
        if self.state == PlaybackState::Paused || !self.sink.is_busy() {
            self.play(playlist)
        } else {
            self.pause();
            Ok(PlayReport::default())
        }
    }

    /// Set the volume as a percentage. Values above 100 are clamped to
    /// 100; the sink receives the mapped `0.0..=1.0` value immediately.
    pub fn set_volume(&mut self, percent: u8) {
        let percent = percent.min(100);
        self.volume_percent = percent;
        self.sink.set_volume(f32::from(percent) / 100.0);
    }
}
