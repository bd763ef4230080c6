use crate::errors::{AppError, AppResult};
use std::fs::File;
use std::path::Path;
use tracing::{debug, warn};
use zip::ZipArchive;

/// Extracts a ZIP archive into `dest_dir`, keeping the archive's internal layout.
///
/// Existing files at the same paths are overwritten. Members whose names would
/// escape `dest_dir` (absolute paths, `..`) are skipped with a warning.
///
/// # Returns
///
/// The number of files written.
///
/// # Errors
///
/// Returns `ArchiveError` if the archive is corrupt and `IoError` if files or
/// directories cannot be created.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use xsd_harvester::extractor;
///
/// # fn main() -> Result<(), xsd_harvester::errors::AppError> {
/// let staging = Path::new("/tmp/xsd_staging");
/// let count = extractor::extract_archive(&staging.join("bundle.zip"), staging)?;
/// println!("{count} files extracted");
/// # Ok(())
/// # }
/// ```
pub fn extract_archive(zip_path: &Path, dest_dir: &Path) -> AppResult<usize> {
    let file = File::open(zip_path).map_err(|e| {
        AppError::IoError(format!(
            "Failed to open ZIP file {}: {}",
            zip_path.display(),
            e
        ))
    })?;

    let mut archive = ZipArchive::new(file).map_err(|e| {
        AppError::ArchiveError(format!(
            "Failed to read ZIP archive {}: {}",
            zip_path.display(),
            e
        ))
    })?;

    let mut written = 0;
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).map_err(|e| {
            AppError::ArchiveError(format!(
                "Failed to read file {} from ZIP {}: {}",
                i,
                zip_path.display(),
                e
            ))
        })?;

        let out_path = match entry.enclosed_name() {
            Some(path) => dest_dir.join(path),
            None => {
                warn!(
                    zip_file = %zip_path.display(),
                    entry = entry.name(),
                    "Skipping archive entry outside extraction root"
                );
                continue;
            }
        };

        if entry.is_dir() {
            std::fs::create_dir_all(&out_path).map_err(|e| {
                AppError::IoError(format!(
                    "Failed to create directory {}: {}",
                    out_path.display(),
                    e
                ))
            })?;
            continue;
        }

        if let Some(parent) = out_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::IoError(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let mut out_file = File::create(&out_path).map_err(|e| {
            AppError::IoError(format!(
                "Failed to create file {}: {}",
                out_path.display(),
                e
            ))
        })?;

        // A truncated or corrupt member surfaces here as a read error.
        std::io::copy(&mut entry, &mut out_file).map_err(|e| {
            AppError::ArchiveError(format!(
                "Failed to copy file from ZIP {} to {}: {}",
                zip_path.display(),
                out_path.display(),
                e
            ))
        })?;

        debug!(file = %out_path.display(), "Extracted archive member");
        written += 1;
    }

    Ok(written)
}
