use crate::constants::ARCHIVE_SUFFIX;
use crate::errors::{AppError, AppResult};
use crate::models::CleanupReport;
use std::fs;
use std::path::Path;
use tracing::info;
use walkdir::WalkDir;

/// Deletes loose files and empty directories from the staging directory.
///
/// Walks bottom-up. Every file whose name does not end in `.zip` is removed,
/// then every directory that is empty at the time it is visited. Archives and
/// the staging directory itself are left in place.
///
/// # Errors
///
/// Returns on the first filesystem error; anything not yet visited stays on disk.
pub fn clean_staging(staging_dir: &Path) -> AppResult<CleanupReport> {
    let mut report = CleanupReport::default();
    if !staging_dir.exists() {
        return Ok(report);
    }

    // Collected up front so the tree is not mutated while it is being read.
    let entries = WalkDir::new(staging_dir)
        .min_depth(1)
        .contents_first(true)
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

    for entry in entries {
        let path = entry.path();
        let name = entry.file_name().to_string_lossy();

        if entry.file_type().is_dir() {
            if is_empty_dir(path)? {
                fs::remove_dir(path).map_err(|e| {
                    AppError::IoError(format!(
                        "Failed to delete directory {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                info!(directory = %name, "Directory deleted");
                report.dirs_deleted += 1;
            }
        } else if !name.ends_with(ARCHIVE_SUFFIX) {
            fs::remove_file(path).map_err(|e| {
                AppError::IoError(format!("Failed to delete file {}: {}", path.display(), e))
            })?;
            info!(file = %name, "File deleted");
            report.files_deleted += 1;
        }
    }

    Ok(report)
}

fn is_empty_dir(path: &Path) -> AppResult<bool> {
    let mut entries = fs::read_dir(path).map_err(|e| {
        AppError::IoError(format!("Failed to read directory {}: {}", path.display(), e))
    })?;
    Ok(entries.next().is_none())
}
