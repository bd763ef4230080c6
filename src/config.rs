use crate::constants::{LISTING_URL, OUTPUT_DIR_NAME, STAGING_DIR_NAME};
use crate::errors::{AppError, AppResult};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

/// Resolved configuration for a single run (no Options).
///
/// Passed explicitly into every pipeline stage; nothing is read from globals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Page scraped for `.zip`/`.xsd` links
    pub listing_url: Url,
    /// Ephemeral directory for downloads and extracted archives
    pub staging_dir: PathBuf,
    /// Persistent directory accumulating the collected schemas
    pub output_dir: PathBuf,
}

impl RunConfig {
    /// Builds a configuration from explicit values.
    ///
    /// # Errors
    ///
    /// Returns `UrlError` if `listing_url` does not parse, and `InvalidInput` if
    /// the URL is not http(s) or the staging and output directories coincide.
    pub fn new(
        listing_url: &str,
        staging_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> AppResult<Self> {
        let config = Self {
            listing_url: Url::parse(listing_url)?,
            staging_dir: staging_dir.into(),
            output_dir: output_dir.into(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Default configuration: the built-in listing URL, a staging directory under
    /// the system temp root, and an output directory one level above the
    /// directory holding the executable.
    pub fn from_defaults() -> AppResult<Self> {
        Self::new(LISTING_URL, default_staging_dir(), default_output_dir()?)
    }

    /// Applies the values present in a config file on top of `self`.
    pub fn with_overrides(mut self, file: ConfigFile) -> AppResult<Self> {
        if let Some(url) = file.listing_url {
            self.listing_url = Url::parse(&url)?;
        }
        if let Some(staging_dir) = file.staging_dir {
            self.staging_dir = staging_dir;
        }
        if let Some(output_dir) = file.output_dir {
            self.output_dir = output_dir;
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> AppResult<()> {
        if !matches!(self.listing_url.scheme(), "http" | "https") {
            return Err(AppError::InvalidInput(format!(
                "Listing URL must use http or https: {}",
                self.listing_url
            )));
        }
        if self.staging_dir.as_os_str().is_empty() || self.output_dir.as_os_str().is_empty() {
            return Err(AppError::InvalidInput(
                "Staging and output directories must not be empty".into(),
            ));
        }
        // The staging directory is deleted at the end of every run.
        if self.staging_dir == self.output_dir {
            return Err(AppError::InvalidInput(format!(
                "Staging directory must differ from output directory: {}",
                self.staging_dir.display()
            )));
        }
        Ok(())
    }
}

/// Configuration that can be loaded from a TOML file.
///
/// Every key is optional; missing keys keep the defaults. Unknown keys are
/// rejected to catch typos.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub listing_url: Option<String>,
    pub staging_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
}

impl ConfigFile {
    /// Loads configuration overrides from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `IoError` if the file cannot be read and `InvalidInput` if the
    /// TOML is malformed or contains unknown keys.
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            AppError::IoError(format!("Failed to read config {}: {e}", path.display()))
        })?;
        toml::from_str(&contents)
            .map_err(|e| AppError::InvalidInput(format!("Failed to parse config: {e}")))
    }
}

fn default_staging_dir() -> PathBuf {
    std::env::temp_dir().join(STAGING_DIR_NAME)
}

fn default_output_dir() -> AppResult<PathBuf> {
    let exe = std::env::current_exe()
        .map_err(|e| AppError::IoError(format!("Failed to locate executable: {e}")))?;
    let exe_dir = exe.parent().ok_or_else(|| {
        AppError::InvalidInput(format!("Executable has no parent: {}", exe.display()))
    })?;
    Ok(exe_dir.join("..").join(OUTPUT_DIR_NAME))
}
