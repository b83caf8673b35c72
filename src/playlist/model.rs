//! Playlist model types: `Track` and `Playlist`.
//!
//! The playlist is an append-only ordered sequence. Every track it holds
//! is fully resolved: remote URLs go through the resolver before the
//! append, so playback never has to resolve anything.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::LibrarySettings;
use crate::library;
use crate::resolver::{Resolve, ResolveError};

/// One playable entry: a local file or a resolved remote stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Track {
    Local {
        path: PathBuf,
        /// Display title from the file's tags, or the file stem.
        title: String,
    },
    Remote {
        /// Direct, playable stream URL (already resolved).
        stream_url: String,
        title: String,
    },
}

impl Track {
    pub fn title(&self) -> &str {
        match self {
            Track::Local { title, .. } => title,
            Track::Remote { title, .. } => title,
        }
    }

    /// Human-readable source reference, used in error messages.
    pub fn source_name(&self) -> String {
        match self {
            Track::Local { path, .. } => path.display().to_string(),
            Track::Remote { stream_url, .. } => stream_url.clone(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AddError {
    #[error("unsupported file type: {}", path.display())]
    UnsupportedExtension { path: PathBuf },
}

/// Append-only ordered sequence of tracks.
#[derive(Debug, Default)]
pub struct Playlist {
    tracks: Vec<Track>,
}

impl Playlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a local file. The path must carry one of the configured
    /// audio extensions; existence is whatever the caller guarantees.
    pub fn add_local(
        &mut self,
        path: &Path,
        settings: &LibrarySettings,
    ) -> Result<&Track, AddError> {
        if !library::is_audio_file(path, settings) {
            return Err(AddError::UnsupportedExtension {
                path: path.to_path_buf(),
            });
        }

        let title = library::local_title(path);
        self.tracks.push(Track::Local {
            path: path.to_path_buf(),
            title,
        });
        Ok(&self.tracks[self.tracks.len() - 1])
    }

    /// Resolve `url` and append the resulting stream. On resolution
    /// failure the playlist is left unchanged.
    pub fn add_remote(
        &mut self,
        url: &str,
        resolver: &dyn Resolve,
    ) -> Result<&Track, ResolveError> {
        let resolved = resolver.resolve(url)?;
        self.tracks.push(Track::Remote {
            stream_url: resolved.stream_url,
            title: resolved.title,
        });
        Ok(&self.tracks[self.tracks.len() - 1])
    }

    /// Track at `index`; `None` when empty or out of range.
    pub fn track_at(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
