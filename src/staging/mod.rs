//! Scoped ownership of the staging directory.
//!
//! [`StagingDir::acquire`] creates the directory and [`StagingDir::release`]
//! cleans and removes it. If the guard is dropped without a successful release
//! (an error propagated out of the pipeline, or a panic), the directory is
//! removed in `Drop` instead.

mod cleanup;

use crate::errors::{AppError, AppResult};
use crate::models::CleanupReport;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub use cleanup::clean_staging;

#[derive(Debug)]
pub struct StagingDir {
    path: PathBuf,
    released: bool,
}

impl StagingDir {
    /// Creates the staging directory if missing and takes ownership of it.
    ///
    /// An existing directory (left behind by a crashed run) is reused as is, so
    /// files already in it are not downloaded again.
    pub fn acquire(path: impl Into<PathBuf>) -> AppResult<Self> {
        let path = path.into();
        if path.exists() {
            debug!(path = %path.display(), "Reusing existing staging directory");
        }
        fs::create_dir_all(&path).map_err(|e| {
            AppError::IoError(format!(
                "Failed to create staging directory {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(Self {
            path,
            released: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Cleans the staging directory and removes it.
    ///
    /// # Errors
    ///
    /// Returns the first filesystem error. The directory is then still removed
    /// when the guard is dropped.
    pub fn release(mut self) -> AppResult<CleanupReport> {
        let report = clean_staging(&self.path)?;
        fs::remove_dir_all(&self.path).map_err(|e| {
            AppError::IoError(format!(
                "Failed to delete staging directory {}: {}",
                self.path.display(),
                e
            ))
        })?;
        self.released = true;
        info!(path = %self.path.display(), "Staging directory deleted");
        Ok(report)
    }
}

impl Drop for StagingDir {
    fn drop(&mut self) {
        if self.released || !self.path.exists() {
            return;
        }
        match fs::remove_dir_all(&self.path) {
            Ok(()) => info!(path = %self.path.display(), "Staging directory deleted"),
            Err(e) => warn!(
                path = %self.path.display(),
                error = %e,
                "Failed to delete staging directory"
            ),
        }
    }
}
