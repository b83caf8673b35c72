//! Playlist module: the ordered track store rendered by the UI.
//!
//! Tracks live in `playlist::model` and are either local files or
//! remote streams resolved before insertion.

mod model;

pub use model::*;
