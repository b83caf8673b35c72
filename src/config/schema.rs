use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/vivace/config.toml` or
/// `~/.config/vivace/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `VIVACE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub audio: AudioSettings,
    pub controls: ControlsSettings,
    pub resolver: ResolverSettings,
    pub library: LibrarySettings,
    pub ui: UiSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Volume applied at startup, as a percentage.
    pub default_volume_percent: u8,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            default_volume_percent: 70,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Volume change applied per Up/Down key press.
    pub volume_step_percent: u8,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            volume_step_percent: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ResolverSettings {
    /// Command used to resolve media URLs into streams.
    pub command: String,
    /// Format selector passed to the resolver via `-f`.
    pub format: String,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            command: "yt-dlp".to_string(),
            format: "bestaudio/best".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks when walking directory arguments.
    pub follow_links: bool,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: vec!["mp3".into(), "ogg".into(), "wav".into()],
            follow_links: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ vivace ~ ".to_string(),
        }
    }
}
