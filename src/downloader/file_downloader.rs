use crate::constants::{ARCHIVE_SUFFIX, PARTIAL_SUFFIX, SCHEMA_SUFFIX};
use crate::errors::{AppError, AppResult};
use crate::extractor::extract_archive;
use crate::models::DownloadOutcome;
use percent_encoding::percent_decode_str;
use std::path::Path;
use tokio::fs;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};
use url::Url;

/// Returns the percent-decoded final path segment of `url`, used as the
/// staging and output filename.
///
/// # Errors
///
/// Returns `ParseError` if the decoded segment is not UTF-8, and `InvalidInput`
/// if it is empty, `.`/`..`, or contains a path separator.
pub fn file_name_from_url(url: &Url) -> AppResult<String> {
    let segment = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or_default();

    let name = percent_decode_str(segment)
        .decode_utf8()
        .map_err(|e| AppError::ParseError(format!("File name in {url} is not UTF-8: {e}")))?;

    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(AppError::InvalidInput(format!(
            "URL has no usable file name: {url}"
        )));
    }
    Ok(name.into_owned())
}

/// Whether `name` is something the pipeline extracts or collects.
fn is_harvestable(name: &str) -> bool {
    name.ends_with(ARCHIVE_SUFFIX) || name.ends_with(SCHEMA_SUFFIX)
}

/// Downloads one link into the staging directory.
///
/// # Behavior
///
/// - **Skip existing**: if a file with the same name is already in
///   `staging_dir`, no request is made. Only the name is checked.
/// - **Atomic write**: the body is streamed to `<name>.part` and renamed when
///   complete, so an interrupted write is never mistaken for a finished file.
/// - **Extract archives**: a `.zip` file is extracted into `staging_dir` right
///   after it is written, keeping the archive's internal layout.
/// - **Rejected status**: a non-success status is reported as
///   [`DownloadOutcome::Rejected`] and nothing is written.
///
/// # Errors
///
/// Returns an error if the request fails, the file cannot be written, or the
/// archive cannot be extracted.
pub async fn download_file(
    client: &reqwest::Client,
    url: &Url,
    staging_dir: &Path,
) -> AppResult<DownloadOutcome> {
    let filename = file_name_from_url(url)?;
    let filename = filename.as_str();
    if !is_harvestable(filename) {
        // e.g. `get.php?f=bundle.zip`: the suffix sits in the query string.
        warn!(
            url = %url,
            filename = filename,
            "File name does not end in .zip or .xsd, it will not be extracted or collected"
        );
    }
    let file_path = staging_dir.join(filename);

    if file_path.exists() {
        debug!(filename = filename, "File already in staging, skipping download");
        return Ok(DownloadOutcome::Skipped);
    }

    let response = client.get(url.as_str()).send().await.map_err(|e| {
        AppError::NetworkError(format!("Failed to download {filename}: {e}"))
    })?;

    let status = response.status();
    if !status.is_success() {
        warn!(
            filename = filename,
            status = status.as_u16(),
            "Server rejected download, skipping"
        );
        return Ok(DownloadOutcome::Rejected {
            status: status.as_u16(),
        });
    }

    let tmp_path = staging_dir.join(format!("{filename}{PARTIAL_SUFFIX}"));
    if tmp_path.exists() {
        fs::remove_file(&tmp_path).await.map_err(|e| {
            AppError::IoError(format!(
                "Failed to remove stale temp file {}: {}",
                tmp_path.display(),
                e
            ))
        })?;
    }

    let bytes = write_body(response, &tmp_path, filename).await?;

    fs::rename(&tmp_path, &file_path).await.map_err(|e| {
        AppError::IoError(format!(
            "Failed to rename temp file {} to {}: {}",
            tmp_path.display(),
            file_path.display(),
            e
        ))
    })?;
    info!(filename = filename, bytes = bytes, "File downloaded");

    let extracted = if filename.ends_with(ARCHIVE_SUFFIX) {
        let zip_path = file_path.clone();
        let dest_dir = staging_dir.to_path_buf();
        let count = tokio::task::spawn_blocking(move || extract_archive(&zip_path, &dest_dir))
            .await
            .map_err(|e| AppError::IoError(format!("Task join error: {e}")))??;
        info!(filename = filename, files = count, "Archive extracted");
        Some(count)
    } else {
        None
    };

    Ok(DownloadOutcome::Downloaded { bytes, extracted })
}

async fn write_body(
    mut response: reqwest::Response,
    tmp_path: &Path,
    filename: &str,
) -> AppResult<u64> {
    let mut file = File::create(tmp_path).await.map_err(|e| {
        AppError::IoError(format!(
            "Failed to create temp file {}: {}",
            tmp_path.display(),
            e
        ))
    })?;

    let mut bytes = 0u64;
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| AppError::NetworkError(format!("Failed to read body of {filename}: {e}")))?
    {
        file.write_all(&chunk).await.map_err(|e| {
            AppError::IoError(format!(
                "Failed to write to temp file {}: {}",
                tmp_path.display(),
                e
            ))
        })?;
        bytes += chunk.len() as u64;
    }

    file.flush().await?;
    Ok(bytes)
}
