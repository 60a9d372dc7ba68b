//! Scoped temporary storage for one tiling session
//!
//! A session owns the uniquely named directory its patches are persisted
//! into. The handle is an explicit value the caller threads through
//! extraction and release, so double-cleanup and use-after-release are
//! detectable errors instead of silent no-ops, and dropping the handle
//! still reclaims the storage on early-abort paths.

use std::path::{Path, PathBuf};

use log::{debug, info};
use tempfile::TempDir;

use crate::tiling::errors::{PatchError, PatchResult};

/// Handle over one session's temporary patch storage
pub struct PatchSession {
    /// Backing directory, None once released
    dir: Option<TempDir>,
}

impl PatchSession {
    /// Begin a session by allocating a fresh storage directory
    ///
    /// The directory name is randomized so concurrent sessions never
    /// collide, even under the same parent.
    ///
    /// # Arguments
    /// * `base_dir` - Optional parent for the storage directory; the
    ///   process default temp location is used when absent
    ///
    /// # Returns
    /// An active session handle, or a storage error
    pub fn begin(base_dir: Option<&Path>) -> PatchResult<Self> {
        let builder_result = match base_dir {
            Some(base) => tempfile::Builder::new().prefix("patchkit-").tempdir_in(base),
            None => tempfile::Builder::new().prefix("patchkit-").tempdir(),
        };

        let dir = builder_result.map_err(PatchError::StorageUnavailable)?;
        info!("Began patch session at {}", dir.path().display());

        Ok(PatchSession { dir: Some(dir) })
    }

    /// Path of the session's storage directory
    ///
    /// # Returns
    /// The directory path, or `SessionReleased` if the storage is gone
    pub fn path(&self) -> PatchResult<&Path> {
        self.dir
            .as_ref()
            .map(|dir| dir.path())
            .ok_or(PatchError::SessionReleased)
    }

    /// Whether the session still owns its storage
    pub fn is_active(&self) -> bool {
        self.dir.is_some()
    }

    /// Delete the session's storage directory and everything in it
    ///
    /// Idempotent: releasing an already-released session succeeds and
    /// does nothing.
    ///
    /// # Returns
    /// Result indicating success or a storage error during deletion
    pub fn release(&mut self) -> PatchResult<()> {
        match self.dir.take() {
            Some(dir) => {
                debug!("Releasing patch session at {}", dir.path().display());
                dir.close().map_err(PatchError::StorageUnavailable)
            }
            None => Ok(()),
        }
    }

    /// Detach the storage directory from the session and keep it on disk
    ///
    /// Used when the caller wants the persisted patches to outlive the
    /// session, e.g. extraction to an inspectable directory.
    ///
    /// # Returns
    /// The kept directory path, or `SessionReleased`
    pub fn keep(&mut self) -> PatchResult<PathBuf> {
        match self.dir.take() {
            Some(dir) => {
                let path = dir.keep();
                info!("Keeping patch directory {}", path.display());
                Ok(path)
            }
            None => Err(PatchError::SessionReleased),
        }
    }
}

// TempDir removes the directory when the handle drops, so an aborted
// session cannot leak storage even if release() is never reached.
