use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

use crate::filename::snapshot_filename;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("snapshot directory missing or not writable: {0}")]
    SnapshotDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Destination for probed response bodies. The validation run only ever
/// talks to this trait; production uses [`SnapshotStore`].
pub trait SnapshotSink: Send + Sync {
    fn write(&self, category: &str, name: &str, content: &str) -> Result<PathBuf, PersistError>;
}

/// Stores one HTML snapshot per endpoint at
/// `<root>/<category>/<sanitized-name>.html`, creating directories as
/// needed and silently overwriting earlier attempts at the same path.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    root: PathBuf,
}

impl SnapshotStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl SnapshotSink for SnapshotStore {
    fn write(&self, category: &str, name: &str, content: &str) -> Result<PathBuf, PersistError> {
        let dir = self.root.join(category);
        ensure_dir(&dir)?;

        let target = dir.join(snapshot_filename(name));
        // Temp file in the destination directory, then rename: concurrent
        // workers writing disjoint paths never observe a partial file.
        let mut tmp = NamedTempFile::new_in(&dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;

        if target.exists() {
            fs::remove_file(&target)?;
        }
        tmp.persist(&target).map_err(|e| PersistError::Io(e.error))?;
        Ok(target)
    }
}

fn ensure_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| PersistError::SnapshotDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(PersistError::SnapshotDir("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| PersistError::SnapshotDir(e.to_string()))?;
    }
    Ok(())
}
