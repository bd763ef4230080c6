use crate::config::{ConfigFile, RunConfig};
use crate::errors::AppResult;
use crate::models::RunSummary;
use crate::pipeline;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::ffi::OsString;
use std::path::PathBuf;

// CLI metadata constants
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
const APP_ABOUT: &str = env!("CARGO_PKG_DESCRIPTION");

fn command() -> Command<'static> {
    Command::new("xsd-harvester")
        .version(APP_VERSION)
        .about(APP_ABOUT)
        .after_help(
            "Without options the built-in listing URL and directories are used.\n\
             Example:\n  xsd-harvester --config harvester.toml",
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("TOML file overriding listing_url, staging_dir and output_dir")
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
}

/// Resolves the run configuration from parsed arguments.
///
/// Starts from [`RunConfig::from_defaults`] and applies the `--config` file
/// when one is given.
fn resolve_config(matches: &ArgMatches) -> AppResult<RunConfig> {
    let config = RunConfig::from_defaults()?;
    match matches.get_one::<PathBuf>("config") {
        Some(path) => config.with_overrides(ConfigFile::from_toml_file(path)?),
        None => Ok(config),
    }
}

/// Parses command-line arguments and runs the harvest.
///
/// `--help` and `--version` are handled by the argument parser, which exits
/// the process.
pub async fn cli<I, T>(args: I) -> AppResult<RunSummary>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = command().get_matches_from(args);
    let config = resolve_config(&matches)?;
    pipeline::run(&config).await
}
