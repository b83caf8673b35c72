//! Stream resolution: turning a media-page URL into a direct audio
//! stream URL plus a display title.
//!
//! The real implementation shells out to `yt-dlp` and reads the JSON
//! dump it prints for the best audio format. The call is synchronous
//! and blocks the event loop for its duration; the UI reports the
//! outcome once it returns.

use std::process::Command;

use serde_json::Value;
use thiserror::Error;

use crate::config::ResolverSettings;

/// A resolved remote track, ready to append to the playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub stream_url: String,
    pub title: String,
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("failed to run {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("resolver failed: {stderr}")]
    Failed { stderr: String },
    #[error("unreadable resolver output: {0}")]
    Json(#[from] serde_json::Error),
    #[error("resolver output is missing `{0}`")]
    MissingField(&'static str),
}

pub trait Resolve {
    fn resolve(&self, url: &str) -> Result<Resolved, ResolveError>;
}

/// Resolver backed by the `yt-dlp` command-line tool.
pub struct YtDlp {
    command: String,
    format: String,
}

impl YtDlp {
    pub fn new(settings: &ResolverSettings) -> Self {
        Self {
            command: settings.command.clone(),
            format: settings.format.clone(),
        }
    }
}

impl Resolve for YtDlp {
    fn resolve(&self, url: &str) -> Result<Resolved, ResolveError> {
        let output = Command::new(&self.command)
            .args(["-j", "--no-playlist", "-f", &self.format, url])
            .output()
            .map_err(|source| ResolveError::Spawn {
                command: self.command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ResolveError::Failed {
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        extract(&output.stdout)
    }
}

/// Pull `url` and `title` out of a yt-dlp `-j` JSON document.
fn extract(json: &[u8]) -> Result<Resolved, ResolveError> {
    let info: Value = serde_json::from_slice(json)?;

    let stream_url = info
        .get("url")
        .and_then(Value::as_str)
        .ok_or(ResolveError::MissingField("url"))?
        .to_string();
    let title = info
        .get("title")
        .and_then(Value::as_str)
        .ok_or(ResolveError::MissingField("title"))?
        .to_string();

    Ok(Resolved { stream_url, title })
}
