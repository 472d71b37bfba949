//! Flat-file snapshot store
//!
//! One file per named snapshot inside a single directory. Names are
//! sanitized before touching the filesystem, so stored names are also
//! the listed names.

use std::fs;
use std::io;
use std::path::PathBuf;

use crate::util::sanitize_snapshot_name;

/// Flat directory of named snapshots.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }

    /// Names of all stored snapshots, sorted.
    pub fn list(&self) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                if let Some(name) = entry.file_name().to_str() {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    /// Persist `data` under `name`.
    ///
    /// Only structured-form content (a JSON array) is accepted; anything
    /// else is a logged no-op. Returns whether the snapshot was stored.
    pub fn save(&self, name: &str, data: &str) -> io::Result<bool> {
        let Some(file_name) = self.checked_name(name) else {
            return Ok(false);
        };
        if !is_json_array(data) {
            tracing::warn!(name = %file_name, "Rejected snapshot that is not a JSON array");
            return Ok(false);
        }
        fs::write(self.dir.join(file_name), data)?;
        Ok(true)
    }

    /// Raw stored content, or an empty string if the snapshot is absent.
    pub fn load(&self, name: &str) -> io::Result<String> {
        let Some(file_name) = self.checked_name(name) else {
            return Ok(String::new());
        };
        match fs::read_to_string(self.dir.join(file_name)) {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(e),
        }
    }

    /// Remove the named snapshot if present.
    pub fn delete(&self, name: &str) -> io::Result<()> {
        let Some(file_name) = self.checked_name(name) else {
            return Ok(());
        };
        match fs::remove_file(self.dir.join(file_name)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }

    fn checked_name(&self, name: &str) -> Option<String> {
        let sanitized = sanitize_snapshot_name(name);
        if sanitized.trim().is_empty() {
            None
        } else {
            Some(sanitized)
        }
    }
}

fn is_json_array(data: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(data)
        .map(|v| v.is_array())
        .unwrap_or(false)
}
