//! xsd-harvester library
//!
//! This crate provides the core functionality for the `xsd-harvester` binary.
//! Keep the crate root minimal; implementation and tests live in their modules.
//!
//! ## Overview
//!
//! A run is a single linear pipeline:
//!
//! - [`downloader`] - Fetches the listing page, extracts `.zip`/`.xsd` links and downloads them
//! - [`extractor`] - Extracts downloaded ZIP archives into the staging directory
//! - [`collector`] - Moves `.xsd` files into the output directory, deduplicated by content hash
//! - [`staging`] - Owns the staging directory and cleans it up on every exit path
//! - [`pipeline`] - Runs the stages in order and reports a [`models::RunSummary`]
//! - [`config`] - Listing URL and directory configuration, optionally from TOML
//! - [`errors`] - Error types used throughout the application
//!
//! ## Example Usage
//!
//! ```no_run
//! use xsd_harvester::{config::RunConfig, pipeline, errors::AppResult};
//!
//! # async fn example() -> AppResult<()> {
//! let config = RunConfig::new(
//!     "https://example.com/downloads/",
//!     "/tmp/xsd_staging",
//!     "schemas",
//! )?;
//! let summary = pipeline::run(&config).await?;
//! assert!(!std::path::Path::new("/tmp/xsd_staging").exists());
//! # let _ = summary;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod collector;
pub mod config;
pub mod constants;
pub mod downloader;
pub mod errors;
pub mod extractor;
pub mod logging;
pub mod models;
pub mod pipeline;
pub mod staging;
