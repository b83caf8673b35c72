//! Application model types: `App` and `InputMode`.

use crate::playlist::Playlist;

/// What keyboard input currently feeds.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputMode {
    /// Keys are transport controls.
    Normal,
    /// Typing a local file path to append.
    LocalPath,
    /// Typing a media URL to resolve and append.
    RemoteUrl,
}

/// The main application model.
pub struct App {
    pub playlist: Playlist,
    pub input_mode: InputMode,
    /// Buffer for the active text entry, if any.
    pub input: String,
    /// Most recent user-visible message (errors, now-playing, skips).
    pub status: Option<String>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            playlist: Playlist::new(),
            input_mode: InputMode::Normal,
            input: String::new(),
            status: None,
        }
    }

    pub fn has_tracks(&self) -> bool {
        !self.playlist.is_empty()
    }

    /// Start local-path entry.
    pub fn begin_local_entry(&mut self) {
        self.input_mode = InputMode::LocalPath;
        self.input.clear();
    }

    /// Start URL entry.
    pub fn begin_remote_entry(&mut self) {
        self.input_mode = InputMode::RemoteUrl;
        self.input.clear();
    }

    /// Abandon the active entry without committing it.
    pub fn cancel_entry(&mut self) {
        self.input_mode = InputMode::Normal;
        self.input.clear();
    }

    /// Append a character to the active entry.
    pub fn push_input_char(&mut self, c: char) {
        self.input.push(c);
    }

    /// Remove the last character from the active entry.
    pub fn pop_input_char(&mut self) {
        self.input.pop();
    }

    /// Take the entry buffer and return to normal mode.
    pub fn take_input(&mut self) -> String {
        self.input_mode = InputMode::Normal;
        std::mem::take(&mut self.input)
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }
}
