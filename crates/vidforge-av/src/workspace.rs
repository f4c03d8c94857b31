//! Workspace management for media assembly.

use crate::{Error, Result};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Scoped workspace for assembling a single video.
///
/// Backed by a uniquely named temporary directory that is never shared
/// between runs. The directory and everything in it is removed when the
/// workspace is dropped, on every exit path; removal errors are swallowed
/// so cleanup can never mask the failure that caused the exit.
///
/// # Example
///
/// ```no_run
/// use vidforge_av::Workspace;
///
/// let workspace = Workspace::new()?;
/// let frame = workspace.write_file("frame.png", b"...")?;
/// assert!(frame.starts_with(workspace.dir()));
/// // Dropping the workspace deletes the directory and its contents.
/// # Ok::<(), vidforge_av::Error>(())
/// ```
pub struct Workspace {
    temp_dir: TempDir,
}

impl Workspace {
    /// Create a new workspace with a unique temporary directory.
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::with_prefix("vidforge-")
            .map_err(|e| Error::Workspace(e.to_string()))?;
        Ok(Self { temp_dir })
    }

    /// Get the workspace directory path.
    pub fn dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Get the path for a file with the given name inside the workspace.
    pub fn file(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    /// Write a buffer to a file inside the workspace, returning its path.
    pub fn write_file(&self, name: &str, contents: &[u8]) -> Result<PathBuf> {
        if contents.is_empty() {
            return Err(Error::InvalidInput(format!("empty buffer for {}", name)));
        }
        let path = self.file(name);
        std::fs::write(&path, contents)?;
        Ok(path)
    }

    /// Read a file from the workspace back into memory.
    pub fn read_file(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.file(name);
        if !path.exists() {
            return Err(Error::file_not_found(path));
        }
        Ok(std::fs::read(&path)?)
    }

    /// Clean up the workspace (discard all files).
    pub fn cleanup(self) {
        // TempDir will clean up on drop
        drop(self.temp_dir);
    }
}
