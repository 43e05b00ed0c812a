//! Filesystem helpers shared by the artifact probes.
//!
//! Every helper here is best-effort: failures come back as a
//! [`Probed::Degraded`] or `None` and are logged, never propagated.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::core::FileStats;
use crate::error::{CensusError, Probed, Result};

/// Read a file into a string with size limit protection.
///
/// # Errors
///
/// * `NotFound` if the file does not exist
/// * `Unreadable` if metadata or content cannot be read, or the content is
///   not UTF-8
/// * `MalformedDocument` if the file exceeds `max_size`
pub fn read_to_string_with_limit(path: &Path, max_size: u64) -> Result<String> {
    let metadata = fs::metadata(path).map_err(|e| CensusError::unreadable(path, e))?;

    let size = metadata.len();
    if size > max_size {
        return Err(CensusError::malformed_document(
            path,
            format!("file is too large ({} bytes, max {} bytes)", size, max_size),
        ));
    }

    fs::read_to_string(path).map_err(|e| CensusError::unreadable(path, e))
}

/// Read a text artifact, degrading on any failure.
pub fn read_text(path: &Path, max_size: u64) -> Probed<String> {
    Probed::from_result(read_to_string_with_limit(path, max_size)).log_degraded("reading artifact")
}

/// Load a JSON document, degrading on read or decode failure.
pub fn load_json(path: &Path, max_size: u64) -> Probed<serde_json::Value> {
    Probed::from_result(read_to_string_with_limit(path, max_size))
        .and_then(|content| match serde_json::from_str(&content) {
            Ok(value) => Probed::Found(value),
            Err(e) => Probed::Degraded(CensusError::malformed_document(path, e.to_string())),
        })
        .log_degraded("loading settings document")
}

/// Size and modification time for an existing file.
pub fn file_stats(path: &Path) -> Option<FileStats> {
    match fs::metadata(path) {
        Ok(metadata) => Some(FileStats {
            size: metadata.len(),
            modified: metadata.modified().ok().map(DateTime::<Local>::from),
        }),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "no stats");
            None
        }
    }
}

/// Resolve a path to an absolute form.
///
/// Existing paths are canonicalized through symlinks. Missing paths are made
/// absolute against the current directory without touching the filesystem.
pub fn resolve_path(path: &Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Immediate subdirectories of `dir`, sorted. Empty if `dir` is missing.
pub fn sorted_subdirs(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut dirs: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    dirs.sort();
    dirs
}

/// Files under `dir` with the given extension, sorted.
///
/// Walks subdirectories when `recursive` is set, but never descends into a
/// symlinked directory; symlinked files are still returned. Unreadable
/// directories are skipped. Empty if `dir` is missing.
pub fn files_with_extension(dir: &Path, extension: &str, recursive: bool) -> Vec<PathBuf> {
    let mut files = Vec::new();
    collect_files(dir, extension, recursive, &mut files);
    files.sort();
    files
}

fn collect_files(dir: &Path, extension: &str, recursive: bool, files: &mut Vec<PathBuf>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            if dir.exists() {
                tracing::warn!(dir = %dir.display(), error = %e, "skipping unreadable directory");
            }
            return;
        }
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        if file_type.is_dir() {
            if recursive {
                collect_files(&path, extension, recursive, files);
            }
            continue;
        }
        if file_type.is_symlink() && !path.is_file() {
            tracing::debug!(path = %path.display(), "not following symlink");
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) == Some(extension) {
            files.push(path);
        }
    }
}
