use xsd_harvester::errors::{AppError, AppResult};
use xsd_harvester::{cli, logging};

fn main() -> AppResult<()> {
    logging::init_logging();

    let rt = tokio::runtime::Runtime::new().map_err(|e| AppError::IoError(e.to_string()))?;
    rt.block_on(cli::cli(std::env::args_os()))?;
    Ok(())
}
