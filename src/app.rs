//! Application module: the UI-facing model.
//!
//! `App` in `app::model` holds the playlist, the text-entry state for
//! the add-local and add-URL actions, and the status line.

mod model;

pub use model::*;
