use crate::constants::SCHEMA_SUFFIX;
use crate::errors::AppResult;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Recursively collects `.xsd` files under `dir`.
///
/// Paths are returned sorted so that, when several files share a name, the
/// order in which they are collected is stable between runs. The suffix match
/// is case-sensitive.
///
/// # Errors
///
/// Returns an error if a directory cannot be read.
pub fn find_schemas(dir: &Path) -> AppResult<Vec<PathBuf>> {
    // Pre-allocate with conservative estimate (a schema bundle is usually a few dozen files)
    let mut v = Vec::with_capacity(32);
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() && is_schema(entry.path()) {
            v.push(entry.into_path());
        }
    }
    Ok(v)
}

fn is_schema(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(SCHEMA_SUFFIX))
}
