//! Playback module: the transport state machine and the audio sink
//! it drives.
//!
//! `Player` in `player::controller` owns the state machine; the sink
//! behind it is the `AudioSink` trait from `player::sink`, implemented
//! for real playback by `RodioSink`.

mod controller;
mod sink;
mod types;

pub use controller::*;
pub use sink::*;
pub use types::*;

#[cfg(test)]
mod tests;
