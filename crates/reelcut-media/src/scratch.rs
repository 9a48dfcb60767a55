//! Scratch artifacts: concat file lists and intermediate clips.
//!
//! A [`ScratchGuard`] owns one scratch path for the duration of a plan's
//! execution and removes the file when dropped, whichever way execution ends.

use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;

use reelcut_core::{ReelcutError, Result};

use crate::plan::ScratchArtifact;

/// Render the concat demuxer's file list for `inputs`, one entry per line.
///
/// Paths are written as given. Single quotes are escaped the way the concat
/// demuxer expects (`'` becomes `'\''`).
pub fn concat_list<P: AsRef<Path>>(inputs: &[P]) -> String {
    let mut list = String::new();
    for input in inputs {
        let path = input.as_ref().to_string_lossy();
        list.push_str("file '");
        list.push_str(&path.replace('\'', r"'\''"));
        list.push_str("'\n");
    }
    list
}

/// A fresh, unique scratch path inside `dir`.
pub fn scratch_path(dir: &Path, label: &str, extension: &str) -> PathBuf {
    dir.join(format!(
        ".reelcut-{}-{label}.{extension}",
        Uuid::new_v4().simple()
    ))
}

/// Removes its scratch file on drop.
#[derive(Debug)]
pub struct ScratchGuard {
    path: PathBuf,
}

impl ScratchGuard {
    /// Take ownership of an artifact's path, writing file-list contents now.
    pub fn acquire(artifact: &ScratchArtifact) -> Result<Self> {
        let guard = Self {
            path: artifact.path().to_path_buf(),
        };
        if let ScratchArtifact::FileList { path, contents } = artifact {
            std::fs::write(path, contents).map_err(|source| ReelcutError::ScratchIo {
                path: path.clone(),
                source,
            })?;
            debug!(path = %path.display(), entries = contents.lines().count(), "Wrote file list");
        }
        Ok(guard)
    }
}

impl Drop for ScratchGuard {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "Removed scratch file"),
            // Intermediates are never created when an earlier step fails.
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!(path = %self.path.display(), error = %e, "Failed to remove scratch file"),
        }
    }
}
