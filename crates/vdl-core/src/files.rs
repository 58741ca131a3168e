//! JSON file helpers for fixture and report directories.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;

/// Errors from reading or writing harness data files.
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    /// The directory could not be read.
    #[error("failed to read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The directory exists but contains no JSON files.
    #[error("directory {path} is empty")]
    EmptyDir { path: PathBuf },

    /// A file could not be read or written.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A file was not valid JSON.
    #[error("invalid JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Read every `.json` file in a directory, sorted by file name.
///
/// Returns `(file stem, parsed value)` pairs. Sorting makes fixture
/// enumeration order independent of the filesystem's `readdir` order.
///
/// # Errors
///
/// Fails if the directory cannot be read, contains no JSON files, or any
/// file fails to parse. Fixture-load errors are fatal to the suite, so
/// nothing is skipped silently.
pub fn read_json_dir(path: &Path) -> Result<Vec<(String, Value)>, FileError> {
    let entries = fs::read_dir(path).map_err(|source| FileError::ReadDir {
        path: path.to_path_buf(),
        source,
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();

    if files.is_empty() {
        return Err(FileError::EmptyDir {
            path: path.to_path_buf(),
        });
    }

    let mut parsed = Vec::with_capacity(files.len());
    for file in files {
        let text = fs::read_to_string(&file).map_err(|source| FileError::Io {
            path: file.clone(),
            source,
        })?;
        let value = serde_json::from_str(&text).map_err(|source| FileError::Parse {
            path: file.clone(),
            source,
        })?;
        let stem = file
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        parsed.push((stem, value));
    }
    Ok(parsed)
}

/// Write a value as pretty-printed JSON (2-space indent), creating parent
/// directories as needed.
pub fn write_json<T: Serialize>(path: &Path, data: &T) -> Result<(), FileError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| FileError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let text = serde_json::to_string_pretty(data).map_err(|source| FileError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, text).map_err(|source| FileError::Io {
        path: path.to_path_buf(),
        source,
    })
}
