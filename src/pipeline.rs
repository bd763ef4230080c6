use crate::collector::collect_schemas;
use crate::config::RunConfig;
use crate::downloader::{download_file, fetch_listing};
use crate::errors::{AppError, AppResult};
use crate::models::{ListingOutcome, RunSummary};
use crate::staging::StagingDir;
use std::fs;
use tracing::info;

/// Runs the whole harvest: fetch the listing, download and extract each link,
/// collect schemas into the output directory, then clean up staging.
///
/// The output directory is created if missing. The staging directory is
/// created at the start and removed on every exit path, including errors.
///
/// # Returns
///
/// A [`RunSummary`] describing what happened. An unavailable listing page is not
/// an error; it is reported through [`RunSummary::listing_status`].
///
/// # Errors
///
/// Returns an error on network failures, filesystem failures, or a corrupt
/// archive. Nothing is retried.
///
/// # Example
///
/// ```no_run
/// use xsd_harvester::{config::RunConfig, pipeline, errors::AppResult};
///
/// # async fn example() -> AppResult<()> {
/// let config = RunConfig::from_defaults()?;
/// let summary = pipeline::run(&config).await?;
/// println!("{} schemas written", summary.collect.written());
/// # Ok(())
/// # }
/// ```
pub async fn run(config: &RunConfig) -> AppResult<RunSummary> {
    fs::create_dir_all(&config.output_dir).map_err(|e| {
        AppError::IoError(format!(
            "Failed to create output directory {}: {}",
            config.output_dir.display(),
            e
        ))
    })?;
    let staging = StagingDir::acquire(&config.staging_dir)?;

    let client = reqwest::Client::new();
    let listing = fetch_listing(&client, &config.listing_url).await?;
    let mut summary = RunSummary::new(&listing);

    if let ListingOutcome::Links(links) = &listing {
        for link in links {
            let outcome = download_file(&client, link, staging.path()).await?;
            summary.record_download(&outcome);
        }
        let staging_dir = staging.path().to_path_buf();
        let output_dir = config.output_dir.clone();
        summary.collect =
            tokio::task::spawn_blocking(move || collect_schemas(&staging_dir, &output_dir))
                .await
                .map_err(|e| AppError::IoError(format!("Task join error: {e}")))??;
    }

    summary.cleanup = tokio::task::spawn_blocking(move || staging.release())
        .await
        .map_err(|e| AppError::IoError(format!("Task join error: {e}")))??;

    info!(
        listing_status = ?summary.listing_status,
        links_found = summary.links_found,
        downloaded = summary.downloaded,
        skipped = summary.skipped,
        rejected = summary.rejected,
        archives_extracted = summary.archives_extracted,
        schemas_written = summary.collect.written(),
        schemas_unchanged = summary.collect.unchanged,
        "All operations completed"
    );

    Ok(summary)
}
