//! The audio sink seam: a small trait over the playback engine, and the
//! `rodio` implementation used outside tests.
//!
//! The trait mirrors what the transport needs: load a source, start at
//! an offset, pause/resume/stop, report busy-ness and position, take a
//! volume. Keeping it narrow lets the controller tests script a sink.

use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::PathBuf;
use std::time::Duration;

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};

use crate::playlist::Track;

use super::types::SinkError;

pub trait AudioSink {
    /// Prepare `track` for playback. For remote tracks this fetches the
    /// stream body synchronously.
    fn load(&mut self, track: &Track) -> Result<(), SinkError>;
    /// Start playing the loaded source at `start_at`.
    fn play(&mut self, start_at: Duration) -> Result<(), SinkError>;
    fn pause(&mut self);
    fn unpause(&mut self);
    fn stop(&mut self);
    /// True while actively producing audio (not paused, not finished).
    fn is_busy(&self) -> bool;
    /// Playback position within the current source.
    fn position(&self) -> Duration;
    /// Volume in the sink's native `0.0..=1.0` range.
    fn set_volume(&mut self, volume: f32);
}

enum Loaded {
    File(PathBuf),
    Bytes { name: String, data: Vec<u8> },
}

/// `rodio`-backed sink. Owns the output stream for the whole process
/// lifetime; dropped (and released) when the runtime shuts down.
pub struct RodioSink {
    stream: OutputStream,
    sink: Option<Sink>,
    loaded: Option<Loaded>,
    volume: f32,
}

impl RodioSink {
    pub fn new() -> Result<Self, SinkError> {
        let mut stream =
            OutputStreamBuilder::open_default_stream().map_err(SinkError::Device)?;
        // rodio logs to stderr when OutputStream is dropped. That's useful in
        // debugging, but noisy for a TUI app.
        stream.log_on_drop(false);

        Ok(Self {
            stream,
            sink: None,
            loaded: None,
            volume: 1.0,
        })
    }

    fn start(&mut self, source: impl Source + Send + 'static) {
        if let Some(old) = self.sink.take() {
            old.stop();
        }

        let sink = Sink::connect_new(self.stream.mixer());
        sink.set_volume(self.volume);
        sink.append(source);
        sink.play();
        self.sink = Some(sink);
    }
}

impl AudioSink for RodioSink {
    fn load(&mut self, track: &Track) -> Result<(), SinkError> {
        let loaded = match track {
            Track::Local { path, .. } => {
                // Open eagerly so a missing file fails here, not mid-play.
                File::open(path).map_err(|source| SinkError::Open {
                    path: path.clone(),
                    source,
                })?;
                Loaded::File(path.clone())
            }
            Track::Remote { stream_url, .. } => {
                let body = reqwest::blocking::get(stream_url)?
                    .error_for_status()?
                    .bytes()?;
                Loaded::Bytes {
                    name: track.source_name(),
                    data: body.to_vec(),
                }
            }
        };
        self.loaded = Some(loaded);
        Ok(())
    }

    fn play(&mut self, start_at: Duration) -> Result<(), SinkError> {
        // Work on an owned copy so the borrow doesn't outlive the sink swap.
        let loaded = match &self.loaded {
            None => return Err(SinkError::NothingLoaded),
            Some(Loaded::File(path)) => Loaded::File(path.clone()),
            Some(Loaded::Bytes { name, data }) => Loaded::Bytes {
                name: name.clone(),
                data: data.clone(),
            },
        };

        match loaded {
            Loaded::File(path) => {
                let file = File::open(&path).map_err(|source| SinkError::Open {
                    path: path.clone(),
                    source,
                })?;
                let decoder =
                    Decoder::new(BufReader::new(file)).map_err(|source| SinkError::Decode {
                        name: path.display().to_string(),
                        source,
                    })?;
                // `skip_duration` is our seeking primitive; Duration::ZERO is fine.
                self.start(decoder.skip_duration(start_at));
            }
            Loaded::Bytes { name, data } => {
                let decoder =
                    Decoder::new(Cursor::new(data)).map_err(|source| SinkError::Decode {
                        name,
                        source,
                    })?;
                self.start(decoder.skip_duration(start_at));
            }
        }
        Ok(())
    }

    fn pause(&mut self) {
        if let Some(ref s) = self.sink {
            s.pause();
        }
    }

    fn unpause(&mut self) {
        if let Some(ref s) = self.sink {
            s.play();
        }
    }

    fn stop(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
    }

    fn is_busy(&self) -> bool {
        self.sink
            .as_ref()
            .map(|s| !s.empty() && !s.is_paused())
            .unwrap_or(false)
    }

    fn position(&self) -> Duration {
        self.sink
            .as_ref()
            .map(|s| s.get_pos())
            .unwrap_or(Duration::ZERO)
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        if let Some(ref s) = self.sink {
            s.set_volume(volume);
        }
    }
}
