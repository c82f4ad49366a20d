//! Flat-file note persistence
//!
//! Notes live in a UTF-8 text file, one note per line, separated by a single
//! `\n` with no trailing newline. Writes are atomic (write to a temp file,
//! then rename) so a crash mid-write never corrupts the previous content.
//!
//! A missing file is the normal first-run state and loads as an empty
//! collection. An empty file loads the same way.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::error::{StorageError, StorageResult};
use crate::config::Config;
use crate::models::{Note, NoteCollection};

/// Persistence handler for the notes file
#[derive(Debug, Clone)]
pub struct NoteFile {
    path: PathBuf,
}

impl NoteFile {
    /// Create a handler for the given file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a handler for the notes file named by the configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.notes_path())
    }

    /// Path of the notes file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if the notes file exists on disk
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read the notes file
    ///
    /// Returns an empty collection if the file doesn't exist.
    /// Any other read failure is returned as an error.
    pub fn load(&self) -> StorageResult<NoteCollection> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No notes file at {:?}, starting empty", self.path);
                return Ok(NoteCollection::new());
            }
            Err(e) => return Err(StorageError::from_read(e, self.path.clone())),
        };

        let notes = parse_notes(&content);
        debug!("Loaded {} note(s) from {:?}", notes.len(), self.path);
        Ok(notes)
    }

    /// Overwrite the notes file with the given collection
    pub fn persist(&self, notes: &NoteCollection) -> StorageResult<()> {
        let content = serialize_notes(notes);
        atomic_write(&self.path, content.as_bytes())?;
        debug!("Persisted {} note(s) to {:?}", notes.len(), self.path);
        Ok(())
    }
}

/// Parse file content into notes
///
/// Every line is trimmed; blank lines are skipped.
pub fn parse_notes(content: &str) -> NoteCollection {
    content.lines().filter_map(Note::parse).collect()
}

/// Serialize notes into file content
pub fn serialize_notes(notes: &NoteCollection) -> String {
    notes
        .iter()
        .map(Note::as_str)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Write data to a file atomically
///
/// 1. Write to a temporary file next to the target
/// 2. Sync the file to disk
/// 3. Rename the temp file to the target path
///
/// The temp file is removed if any step fails.
fn atomic_write(path: &Path, data: &[u8]) -> StorageResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|source| StorageError::CreateDirectory {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    let temp_path = temp_path_for(path);

    let result = write_and_sync(&temp_path, data).and_then(|()| {
        fs::rename(&temp_path, path).map_err(|source| StorageError::AtomicWriteFailed {
            from: temp_path.clone(),
            to: path.to_path_buf(),
            source,
        })
    });

    if result.is_err() && temp_path.exists() {
        if let Err(e) = fs::remove_file(&temp_path) {
            warn!("Failed to remove temp file {:?}: {}", temp_path, e);
        }
    }

    result
}

fn write_and_sync(temp_path: &Path, data: &[u8]) -> StorageResult<()> {
    let mut file = File::create(temp_path)
        .map_err(|e| StorageError::from_write(e, temp_path.to_path_buf()))?;

    file.write_all(data)
        .map_err(|e| StorageError::from_write(e, temp_path.to_path_buf()))?;

    file.sync_all()
        .map_err(|e| StorageError::from_write(e, temp_path.to_path_buf()))
}

/// `notes.txt` -> `notes.txt.tmp`
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
