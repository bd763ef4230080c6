//! Collects schema files from the staging directory into the output directory.
//!
//! Subdirectory structure is flattened: files are keyed by name only, and a
//! same-named file replaces the output copy only when its SHA-256 digest differs.

mod file_finder;
mod mover;

use crate::errors::AppResult;
use crate::models::CollectReport;
use std::path::Path;
use tracing::info;

// Re-export public API
pub use file_finder::find_schemas;
pub use mover::{content_digest, move_if_changed};

/// Moves every `.xsd` file under `staging_dir` into `output_dir`.
///
/// Files are processed in sorted path order; when two staged files share a
/// name, the later one wins if its content differs.
///
/// # Errors
///
/// Returns an error on the first filesystem failure. Files moved before the
/// failure stay in the output directory.
pub fn collect_schemas(staging_dir: &Path, output_dir: &Path) -> AppResult<CollectReport> {
    let schemas = find_schemas(staging_dir)?;
    info!(found = schemas.len(), "Collecting schemas");

    let mut report = CollectReport::default();
    for schema in &schemas {
        report.record(move_if_changed(schema, output_dir)?);
    }

    info!(
        moved = report.moved,
        replaced = report.replaced,
        unchanged = report.unchanged,
        "Collection completed"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_collect_flattens_nested_schemas() {
        let temp_dir = TempDir::new().unwrap();
        let staging = temp_dir.path().join("staging");
        let output = temp_dir.path().join("output");
        fs::create_dir_all(staging.join("bundle/nested")).unwrap();
        fs::create_dir_all(&output).unwrap();
        fs::write(staging.join("bundle/nested/schema1.xsd"), "<one/>").unwrap();
        fs::write(staging.join("bundle/nested/schema2.xsd"), "<two/>").unwrap();
        fs::write(staging.join("bundle/notes.txt"), "skip").unwrap();

        let report = collect_schemas(&staging, &output).unwrap();
        assert_eq!(report.moved, 2);
        assert!(output.join("schema1.xsd").is_file());
        assert!(output.join("schema2.xsd").is_file());
        assert!(!output.join("bundle").exists());
        assert!(!output.join("notes.txt").exists());
    }

    #[test]
    fn test_collect_same_name_collision_last_distinct_wins() {
        let temp_dir = TempDir::new().unwrap();
        let staging = temp_dir.path().join("staging");
        let output = temp_dir.path().join("output");
        fs::create_dir_all(staging.join("a")).unwrap();
        fs::create_dir_all(staging.join("b")).unwrap();
        fs::create_dir_all(&output).unwrap();
        fs::write(staging.join("a/common.xsd"), "<from-a/>").unwrap();
        fs::write(staging.join("b/common.xsd"), "<from-b/>").unwrap();

        let report = collect_schemas(&staging, &output).unwrap();
        assert_eq!(report.moved, 1);
        assert_eq!(report.replaced, 1);
        assert_eq!(
            fs::read_to_string(output.join("common.xsd")).unwrap(),
            "<from-b/>"
        );
    }
}
