use std::path::{Path, PathBuf};

use lofty::prelude::*;
use walkdir::WalkDir;

use crate::config::LibrarySettings;

/// True when `path` carries one of the configured audio extensions
/// (case-insensitive, dot optional in the config).
pub fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

/// Display title for a local file: the tag title when the file has one,
/// the file stem otherwise.
pub fn local_title(path: &Path) -> String {
    if let Some(title) = probe_title(path) {
        return title;
    }
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("UNKNOWN")
        .to_string()
}

fn probe_title(path: &Path) -> Option<String> {
    let tagged = lofty::read_from_path(path).ok()?;
    let tag = tagged.primary_tag().or_else(|| tagged.first_tag())?;
    tag.title()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Expand command-line arguments into playable paths: files are taken
/// as-is, directories are walked and filtered by extension.
pub fn gather(args: &[String], settings: &LibrarySettings) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = Vec::new();

    for arg in args {
        let path = Path::new(arg);
        if path.is_dir() {
            let mut found: Vec<PathBuf> = WalkDir::new(path)
                .follow_links(settings.follow_links)
                .into_iter()
                .filter_map(Result::ok)
                .map(|e| e.into_path())
                .filter(|p| p.is_file() && is_audio_file(p, settings))
                .collect();
            // Directory walks come back in filesystem order; keep it stable.
            found.sort();
            paths.extend(found);
        } else {
            paths.push(path.to_path_buf());
        }
    }

    paths
}
