//! Listing and download operations.
//!
//! This module fetches the listing page, extracts `.zip`/`.xsd` links, and downloads
//! each link into the staging directory. The main entry points are [`fetch_listing`]
//! and [`download_file`].

mod file_downloader;
mod link_fetcher;

// Re-export public API
pub use file_downloader::{download_file, file_name_from_url};
pub use link_fetcher::{fetch_listing, parse_schema_links};
