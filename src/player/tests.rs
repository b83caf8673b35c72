use std::path::Path;
use std::time::Duration;

use super::*;
use crate::config::LibrarySettings;
use crate::playlist::{Playlist, Track};

/// Scripted sink: records every call and fails loads whose source name
/// contains "bad".
#[derive(Debug, PartialEq)]
enum Call {
    Load(String),
    Play(Duration),
    Pause,
    Unpause,
    Stop,
    SetVolume(f32),
}

#[derive(Default)]
struct MockSink {
    calls: Vec<Call>,
    busy: bool,
    paused: bool,
    position: Duration,
}

impl AudioSink for MockSink {
    fn load(&mut self, track: &Track) -> Result<(), SinkError> {
        let name = track.source_name();
        self.calls.push(Call::Load(name.clone()));
        if name.contains("bad") {
            return Err(SinkError::NothingLoaded);
        }
        Ok(())
    }

    fn play(&mut self, start_at: Duration) -> Result<(), SinkError> {
        self.calls.push(Call::Play(start_at));
        self.busy = true;
        self.paused = false;
        Ok(())
    }

    fn pause(&mut self) {
        self.calls.push(Call::Pause);
        self.paused = true;
    }

    fn unpause(&mut self) {
        self.calls.push(Call::Unpause);
        self.paused = false;
    }

    fn stop(&mut self) {
        self.calls.push(Call::Stop);
        self.busy = false;
        self.paused = false;
    }

    fn is_busy(&self) -> bool {
        self.busy && !self.paused
    }

    fn position(&self) -> Duration {
        self.position
    }

    fn set_volume(&mut self, volume: f32) {
        self.calls.push(Call::SetVolume(volume));
    }
}

fn playlist_of(names: &[&str]) -> Playlist {
    let settings = LibrarySettings::default();
    let mut playlist = Playlist::new();
    for name in names {
        playlist
            .add_local(Path::new(&format!("{name}.mp3")), &settings)
            .unwrap();
    }
    playlist
}

fn player() -> Player<MockSink> {
    Player::new(MockSink::default(), 70)
}

/// Calls made after construction (skips the initial volume call).
fn calls_after_init(p: &Player<MockSink>) -> &[Call] {
    &p.sink().calls[1..]
}

#[test]
fn new_applies_the_default_volume() {
    let p = player();
    assert_eq!(p.sink().calls, vec![Call::SetVolume(0.7)]);
    assert_eq!(p.volume_percent(), 70);
    assert_eq!(p.state(), PlaybackState::Stopped);
}

#[test]
fn play_on_empty_playlist_is_a_silent_no_op() {
    let mut p = player();
    let report = p.play(&Playlist::new()).unwrap();
    assert!(report.started.is_none());
    assert!(report.skipped.is_empty());
    assert_eq!(p.state(), PlaybackState::Stopped);
    assert!(calls_after_init(&p).is_empty());
}

#[test]
fn play_loads_and_starts_the_current_track() {
    let playlist = playlist_of(&["a", "b"]);
    let mut p = player();

    let report = p.play(&playlist).unwrap();
    assert_eq!(report.started, Some(0));
    assert_eq!(p.state(), PlaybackState::Playing);
    assert_eq!(
        calls_after_init(&p),
        &[Call::Load("a.mp3".into()), Call::Play(Duration::ZERO)]
    );
}

#[test]
fn next_wraps_and_plays_from_the_start() {
    let playlist = playlist_of(&["a", "b"]);
    let mut p = player();

    let report = p.next(&playlist).unwrap();
    assert_eq!(report.started, Some(1));
    assert_eq!(p.current_index(), 1);

    let report = p.next(&playlist).unwrap();
    assert_eq!(report.started, Some(0));
    assert_eq!(p.current_index(), 0);

    assert_eq!(
        calls_after_init(&p),
        &[
            Call::Load("b.mp3".into()),
            Call::Play(Duration::ZERO),
            Call::Load("a.mp3".into()),
            Call::Play(Duration::ZERO),
        ]
    );
}

#[test]
fn previous_wraps_backwards() {
    let playlist = playlist_of(&["a", "b", "c"]);
    let mut p = player();

    p.previous(&playlist).unwrap();
    assert_eq!(p.current_index(), 2);
    p.previous(&playlist).unwrap();
    assert_eq!(p.current_index(), 1);
}

#[test]
fn next_then_previous_returns_to_the_starting_index() {
    let playlist = playlist_of(&["a", "b", "c"]);
    let mut p = player();
    p.play(&playlist).unwrap();

    p.next(&playlist).unwrap();
    p.previous(&playlist).unwrap();
    assert_eq!(p.current_index(), 0);
}

#[test]
fn single_track_playlist_skips_stay_at_zero() {
    let playlist = playlist_of(&["only"]);
    let mut p = player();

    p.next(&playlist).unwrap();
    assert_eq!(p.current_index(), 0);
    p.previous(&playlist).unwrap();
    assert_eq!(p.current_index(), 0);
}

#[test]
fn next_on_empty_playlist_is_a_no_op() {
    let mut p = player();
    let report = p.next(&Playlist::new()).unwrap();
    assert!(report.started.is_none());
    assert_eq!(p.state(), PlaybackState::Stopped);
    assert!(calls_after_init(&p).is_empty());
}

#[test]
fn pause_captures_position_and_play_resumes_in_place() {
    let playlist = playlist_of(&["a"]);
    let mut p = player();
    p.play(&playlist).unwrap();

    p.sink_mut().position = Duration::from_secs(3);
    p.pause();
    assert_eq!(p.state(), PlaybackState::Paused);
    assert_eq!(p.position(), Duration::from_secs(3));

    let report = p.play(&playlist).unwrap();
    assert_eq!(report.started, Some(0));
    assert_eq!(p.state(), PlaybackState::Playing);
    // Resume goes through unpause; no reload, no seek back to zero.
    assert_eq!(
        calls_after_init(&p),
        &[
            Call::Load("a.mp3".into()),
            Call::Play(Duration::ZERO),
            Call::Pause,
            Call::Unpause,
        ]
    );
}

#[test]
fn paused_position_carries_into_a_fresh_play() {
    // A play intent issued while already playing reloads the track at the
    // captured position; only stop and skips reset it.
    let playlist = playlist_of(&["a"]);
    let mut p = player();
    p.play(&playlist).unwrap();

    p.sink_mut().position = Duration::from_secs(7);
    p.pause();
    p.play(&playlist).unwrap(); // resume via unpause

    p.play(&playlist).unwrap(); // fresh load while Playing
    assert_eq!(
        p.sink().calls.last(),
        Some(&Call::Play(Duration::from_secs(7)))
    );
}

#[test]
fn pause_while_stopped_is_a_no_op() {
    let mut p = player();
    p.pause();
    assert_eq!(p.state(), PlaybackState::Stopped);
    assert!(calls_after_init(&p).is_empty());
}

#[test]
fn pause_while_already_paused_is_a_no_op() {
    let playlist = playlist_of(&["a"]);
    let mut p = player();
    p.play(&playlist).unwrap();
    p.pause();

    let calls_before = p.sink().calls.len();
    p.pause();
    assert_eq!(p.sink().calls.len(), calls_before);
    assert_eq!(p.state(), PlaybackState::Paused);
}

#[test]
fn stop_resets_the_resume_position() {
    let playlist = playlist_of(&["a"]);
    let mut p = player();
    p.play(&playlist).unwrap();

    p.sink_mut().position = Duration::from_secs(9);
    p.pause();
    p.stop();
    assert_eq!(p.state(), PlaybackState::Stopped);

    p.play(&playlist).unwrap();
    assert_eq!(p.sink().calls.last(), Some(&Call::Play(Duration::ZERO)));
}

#[test]
fn toggle_alternates_between_play_and_pause() {
    let playlist = playlist_of(&["a"]);
    let mut p = player();

    p.toggle(&playlist).unwrap();
    assert_eq!(p.state(), PlaybackState::Playing);

    p.toggle(&playlist).unwrap();
    assert_eq!(p.state(), PlaybackState::Paused);

    p.toggle(&playlist).unwrap();
    assert_eq!(p.state(), PlaybackState::Playing);
    assert_eq!(p.sink().calls.last(), Some(&Call::Unpause));
}

#[test]
fn playback_failure_skips_to_the_next_track() {
    let playlist = playlist_of(&["bad", "good"]);
    let mut p = player();

    let report = p.play(&playlist).unwrap();
    assert_eq!(report.started, Some(1));
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].index, 0);
    assert_eq!(p.state(), PlaybackState::Playing);
    assert_eq!(p.current_index(), 1);
}

#[test]
fn all_tracks_unplayable_is_terminal_not_a_loop() {
    let playlist = playlist_of(&["bad1", "bad2", "bad3"]);
    let mut p = player();

    let err = p.play(&playlist).unwrap_err();
    match err {
        PlayerError::AllTracksUnplayable { attempts, skipped } => {
            assert_eq!(attempts, 3);
            assert_eq!(skipped.len(), 3);
        }
    }
    assert_eq!(p.state(), PlaybackState::Stopped);

    // Exactly one load per track, then a stop; no unbounded cascade.
    let loads = p
        .sink()
        .calls
        .iter()
        .filter(|c| matches!(c, Call::Load(_)))
        .count();
    assert_eq!(loads, 3);
    assert_eq!(p.sink().calls.last(), Some(&Call::Stop));
}

#[test]
fn skipped_tracks_restart_from_zero() {
    let playlist = playlist_of(&["a", "bad", "c"]);
    let mut p = player();
    p.play(&playlist).unwrap();

    // Pause partway through "a", then skip forward; "bad" fails and "c"
    // must start from the beginning, not the stale resume position.
    p.sink_mut().position = Duration::from_secs(5);
    p.pause();
    let report = p.next(&playlist).unwrap();
    assert_eq!(report.started, Some(2));
    assert_eq!(p.sink().calls.last(), Some(&Call::Play(Duration::ZERO)));
}

#[test]
fn volume_maps_percent_to_unit_range() {
    let mut p = player();
    p.set_volume(0);
    assert_eq!(p.sink().calls.last(), Some(&Call::SetVolume(0.0)));
    assert_eq!(p.volume_percent(), 0);

    p.set_volume(100);
    assert_eq!(p.sink().calls.last(), Some(&Call::SetVolume(1.0)));
    assert_eq!(p.volume_percent(), 100);
}

#[test]
fn volume_above_100_is_clamped() {
    let mut p = player();
    p.set_volume(250);
    assert_eq!(p.volume_percent(), 100);
    assert_eq!(p.sink().calls.last(), Some(&Call::SetVolume(1.0)));
}

#[test]
fn volume_can_be_set_before_anything_is_loaded() {
    let mut p = player();
    p.set_volume(30);
    assert_eq!(p.state(), PlaybackState::Stopped);
    assert_eq!(p.sink().calls.last(), Some(&Call::SetVolume(0.3)));
}
