use crate::errors::{AppError, AppResult};
use crate::models::CollectOutcome;
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

const HASH_BLOCK_SIZE: usize = 64 * 1024;

/// Computes the SHA-256 digest of a file as a lowercase hex string.
pub fn content_digest(path: &Path) -> AppResult<String> {
    let mut file = File::open(path).map_err(|e| {
        AppError::IoError(format!("Failed to open {}: {}", path.display(), e))
    })?;

    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; HASH_BLOCK_SIZE];
    loop {
        let n = file.read(&mut buf).map_err(|e| {
            AppError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

/// Moves `source` into `output_dir` under its own file name.
///
/// A missing target is always written. An existing target is overwritten only
/// when its digest differs from the source; otherwise both files are left as
/// they are.
///
/// # Errors
///
/// Returns an error if `source` has no file name or any read, rename or copy
/// fails.
pub fn move_if_changed(source: &Path, output_dir: &Path) -> AppResult<CollectOutcome> {
    let file_name = source.file_name().ok_or_else(|| {
        AppError::InvalidInput(format!("Path has no file name: {}", source.display()))
    })?;
    let target = output_dir.join(file_name);

    let outcome = if !target.exists() {
        CollectOutcome::Moved
    } else if content_digest(source)? != content_digest(&target)? {
        CollectOutcome::Replaced
    } else {
        debug!(file = %target.display(), "Schema unchanged, keeping existing file");
        return Ok(CollectOutcome::Unchanged);
    };

    move_file(source, &target)?;
    let replaced = outcome == CollectOutcome::Replaced;
    info!(
        file = %file_name.to_string_lossy(),
        replaced = replaced,
        "Schema moved to output directory"
    );
    Ok(outcome)
}

/// Renames `source` to `target`, falling back to copy + remove when the two
/// paths are on different filesystems.
fn move_file(source: &Path, target: &Path) -> AppResult<()> {
    if fs::rename(source, target).is_ok() {
        return Ok(());
    }

    fs::copy(source, target).map_err(|e| {
        AppError::IoError(format!(
            "Failed to copy {} to {}: {}",
            source.display(),
            target.display(),
            e
        ))
    })?;
    fs::remove_file(source).map_err(|e| {
        AppError::IoError(format!("Failed to remove {}: {}", source.display(), e))
    })?;
    Ok(())
}
